// Repository trait for completed batch records
use crate::domain::history::HistoricalBatchRecord;
use async_trait::async_trait;

#[async_trait]
pub trait BatchHistoryRepository: Send + Sync {
    /// Most recent `count` completed batches, newest first
    async fn recent_batches(&self, count: usize) -> anyhow::Result<Vec<HistoricalBatchRecord>>;
}
