// HTTP route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    acknowledge_alert, batch_history, get_snapshot, health_check, maintenance, plc_registers,
    stream_snapshots,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/snapshot", get(get_snapshot))
        .route("/snapshot/stream", get(stream_snapshots))
        .route("/alerts/:id/ack", post(acknowledge_alert))
        .route("/plc/registers", get(plc_registers))
        .route("/maintenance", get(maintenance))
        .route("/batches/history", get(batch_history))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
