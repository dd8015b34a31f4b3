// Completed batch history domain model
use chrono::{DateTime, Datelike, Duration, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::batch::{DEFAULT_RECIPE, format_batch_id};
use super::signal::round_to;

pub const RECIPES: [&str; 4] = [DEFAULT_RECIPE, "RX-Chem-B2", "RX-Bio-C3", "RX-Agro-D4"];

const BATCH_SPACING_HOURS: f64 = 8.0;
const SPACING_JITTER_HOURS: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchOutcome {
    Success,
    Partial,
    Failed,
}

impl BatchOutcome {
    pub fn from_yield(yield_percent: f64) -> Self {
        if yield_percent < 75.0 {
            BatchOutcome::Failed
        } else if yield_percent < 85.0 {
            BatchOutcome::Partial
        } else {
            BatchOutcome::Success
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalBatchRecord {
    pub id: String,
    pub date: DateTime<Utc>,
    pub recipe: String,
    /// Minutes
    pub duration: u32,
    #[serde(rename = "yield")]
    pub yield_percent: f64,
    pub purity: f64,
    pub status: BatchOutcome,
    pub risk_peak: u8,
}

/// Generate `count` completed batches, most recent first.
pub fn generate_history<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    now: DateTime<Utc>,
) -> Vec<HistoricalBatchRecord> {
    (0..count)
        .map(|i| {
            let yield_percent = round_to(70.0 + rng.r#gen::<f64>() * 28.0, 1);
            let purity = round_to(92.0 + rng.r#gen::<f64>() * 7.5, 1);
            let hours_ago = i as f64 * BATCH_SPACING_HOURS + rng.r#gen::<f64>() * SPACING_JITTER_HOURS;
            let recipe = RECIPES.choose(rng).copied().unwrap_or(DEFAULT_RECIPE);

            HistoricalBatchRecord {
                id: format_batch_id(now.year(), (count - i) as u64),
                date: now - Duration::milliseconds((hours_ago * 3_600_000.0) as i64),
                recipe: recipe.to_string(),
                duration: (150.0 + rng.r#gen::<f64>() * 60.0).round() as u32,
                yield_percent,
                purity,
                status: BatchOutcome::from_yield(yield_percent),
                risk_peak: (10.0 + rng.r#gen::<f64>() * 70.0).round() as u8,
            }
        })
        .collect()
}

/// Aggregate outcome counts for a history population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub total: usize,
    pub success: usize,
    pub partial: usize,
    pub failed: usize,
    pub avg_yield: f64,
}

impl HistorySummary {
    pub fn from_records(records: &[HistoricalBatchRecord]) -> Self {
        let count = |outcome| records.iter().filter(|r| r.status == outcome).count();
        let avg_yield = if records.is_empty() {
            0.0
        } else {
            let sum: f64 = records.iter().map(|r| r.yield_percent).sum();
            round_to(sum / records.len() as f64, 1)
        };

        Self {
            total: records.len(),
            success: count(BatchOutcome::Success),
            partial: count(BatchOutcome::Partial),
            failed: count(BatchOutcome::Failed),
            avg_yield,
        }
    }
}
