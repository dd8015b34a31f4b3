// HTTP request handlers
use crate::application::history_service::BatchHistoryReport;
use crate::domain::history::HistorySummary;
use crate::domain::maintenance::maintenance_plan;
use crate::domain::plc::{PlcRegister, register_map};
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::json_response;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub count: Option<usize>,
}

/// Check if client accepts Brotli compression
fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get("accept-encoding")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.contains("br"))
        .unwrap_or(false)
}

async fn respond<T: serde::Serialize>(data: &T, headers: &HeaderMap) -> axum::response::Response {
    match json_response(data, accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current session snapshot
pub async fn get_snapshot(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let snapshot = state.session.current_snapshot();
    respond(&snapshot, &headers).await
}

/// Stream one snapshot per tick (progressive updates)
pub async fn stream_snapshots(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let rx = state.streaming_service.stream_snapshots();
    stream_from_receiver(rx, accepts_brotli(&headers)).await
}

/// Acknowledge an alert; unknown ids are accepted and ignored
pub async fn acknowledge_alert(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> StatusCode {
    state.session.acknowledge(&id);
    StatusCode::NO_CONTENT
}

/// Holding register view of the latest sample
pub async fn plc_registers(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let snapshot = state.session.current_snapshot();
    let registers: Vec<PlcRegister> = snapshot
        .latest_sample
        .as_ref()
        .map(|sample| register_map(sample, snapshot.batch_state.phase))
        .unwrap_or_default();
    respond(&registers, &headers).await
}

/// Maintenance plan derived from current equipment health
pub async fn maintenance(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let snapshot = state.session.current_snapshot();
    let plan = maintenance_plan(&snapshot.motor_health, &snapshot.power_supply);
    respond(&plan, &headers).await
}

/// Completed batch history with outcome summary
pub async fn batch_history(
    Query(query): Query<HistoryQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let report = match state.history_service.report(query.count).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "error fetching batch history");
            // Return empty history on error
            BatchHistoryReport {
                summary: HistorySummary::from_records(&[]),
                batches: Vec::new(),
            }
        }
    };
    respond(&report, &headers).await
}
