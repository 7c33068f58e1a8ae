use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database row for the baselines table. One row per instrument, replaced on
/// every recomputation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Baseline {
    pub instrument_id: String,
    pub mean_return: f64,
    /// Population standard deviation of returns, floored above zero.
    pub std_return: f64,
    pub avg_volume: f64,
    pub sample_count: i32,
    pub lookback_days: i32,
    pub computed_at: DateTime<Utc>,
}
