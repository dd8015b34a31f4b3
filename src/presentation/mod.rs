// Presentation layer - HTTP adapter over the telemetry session
pub mod app_state;
pub mod handlers;
pub mod routes;
