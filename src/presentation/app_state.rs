// Application state for HTTP handlers
use crate::application::history_service::BatchHistoryService;
use crate::application::session_handle::SessionHandle;
use crate::application::streaming_service::SnapshotStreamingService;

#[derive(Clone)]
pub struct AppState {
    pub session: SessionHandle,
    pub streaming_service: SnapshotStreamingService,
    pub history_service: BatchHistoryService,
}
