// Application layer - Session orchestration and use cases
pub mod clock;
pub mod history_repository;
pub mod history_service;
pub mod session_handle;
pub mod streaming_service;
pub mod telemetry_session;
