// Synthetic batch history - Generates completed batches on request
use crate::application::clock::Clock;
use crate::application::history_repository::BatchHistoryRepository;
use crate::domain::history::{HistoricalBatchRecord, generate_history};
use async_trait::async_trait;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

pub struct SyntheticHistoryRepository {
    rng: Mutex<StdRng>,
    clock: Arc<dyn Clock>,
}

impl SyntheticHistoryRepository {
    pub fn new(seed: Option<u64>, clock: Arc<dyn Clock>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
            clock,
        }
    }
}

#[async_trait]
impl BatchHistoryRepository for SyntheticHistoryRepository {
    async fn recent_batches(&self, count: usize) -> anyhow::Result<Vec<HistoricalBatchRecord>> {
        let now = self.clock.now();
        let records = generate_history(&mut *self.rng.lock(), count, now);
        tracing::debug!(count = records.len(), "generated batch history");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::clock::ManualClock;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_records_are_dated_from_the_clock() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        let repository = SyntheticHistoryRepository::new(Some(10), Arc::new(ManualClock::new(now)));

        let records = repository.recent_batches(20).await.unwrap();
        assert_eq!(records.len(), 20);
        assert_eq!(records[0].id, "BG-2026-0020");
        assert!(records.iter().all(|r| r.date <= now));
    }
}
