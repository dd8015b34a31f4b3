// Batch history service - Use case for batch analytics
use crate::application::history_repository::BatchHistoryRepository;
use crate::domain::history::{HistoricalBatchRecord, HistorySummary};
use serde::Serialize;
use std::sync::Arc;

pub const DEFAULT_HISTORY_COUNT: usize = 20;
pub const MAX_HISTORY_COUNT: usize = 500;

#[derive(Debug, Clone, Serialize)]
pub struct BatchHistoryReport {
    pub summary: HistorySummary,
    pub batches: Vec<HistoricalBatchRecord>,
}

#[derive(Clone)]
pub struct BatchHistoryService {
    repository: Arc<dyn BatchHistoryRepository>,
}

impl BatchHistoryService {
    pub fn new(repository: Arc<dyn BatchHistoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn report(&self, count: Option<usize>) -> anyhow::Result<BatchHistoryReport> {
        let count = count
            .unwrap_or(DEFAULT_HISTORY_COUNT)
            .min(MAX_HISTORY_COUNT);
        let batches = self.repository.recent_batches(count).await?;
        let summary = HistorySummary::from_records(&batches);
        Ok(BatchHistoryReport { summary, batches })
    }
}
