// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use reactor_telemetry::application::history_service::BatchHistoryService;
use reactor_telemetry::application::streaming_service::SnapshotStreamingService;
use reactor_telemetry::infrastructure::config::load_app_config;
use reactor_telemetry::infrastructure::synthetic_history_repository::SyntheticHistoryRepository;
use reactor_telemetry::presentation::app_state::AppState;
use reactor_telemetry::presentation::routes::router;
use reactor_telemetry::{Clock, SessionHandle, SystemClock, create_session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let app_config = load_app_config().context("failed to load configuration")?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // Start the simulation session (application layer)
    let session = create_session(app_config.simulation.session_config(), clock.clone())
        .context("invalid simulation settings")?;

    // Create repository (infrastructure layer)
    let history_repository = Arc::new(SyntheticHistoryRepository::new(
        app_config.simulation.seed,
        clock,
    ));

    // Create application state
    let state = Arc::new(AppState {
        session: session.clone(),
        streaming_service: SnapshotStreamingService::new(session.clone()),
        history_service: BatchHistoryService::new(history_repository),
    });

    // Build router (presentation layer)
    let app = router(state);

    // Start server
    let addr: SocketAddr = app_config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address {}", app_config.server.bind_addr))?;
    tracing::info!(%addr, "starting reactor-telemetry service");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(session.clone()))
        .await?;

    session.shutdown().await;
    tracing::info!("reactor-telemetry stopped");

    Ok(())
}

/// Waits for Ctrl-C, then stops the session so open snapshot streams end
/// before axum waits on their connections.
async fn shutdown_signal(session: SessionHandle) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    session.stop();
}
