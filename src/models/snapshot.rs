use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Immutable price observation for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PriceSnapshot {
    pub instrument_id: String,
    pub event_id: String,
    pub timestamp_ms: i64,
    /// Normalized price, always within [0, 1].
    pub price01: f64,
    /// Volume traded since the previous snapshot of the same instrument.
    pub volume_since_prev: f64,
}

impl PriceSnapshot {
    pub fn new(
        instrument_id: impl Into<String>,
        event_id: impl Into<String>,
        timestamp_ms: i64,
        price01: f64,
        volume_since_prev: f64,
    ) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            event_id: event_id.into(),
            timestamp_ms,
            price01: price01.clamp(0.0, 1.0),
            volume_since_prev: volume_since_prev.max(0.0),
        }
    }
}

/// Inclusive `[from_ms, to_ms]` time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub from_ms: i64,
    pub to_ms: i64,
}

impl TimeRange {
    pub fn new(from_ms: i64, to_ms: i64) -> Self {
        Self { from_ms, to_ms }
    }

    pub fn contains(&self, ts_ms: i64) -> bool {
        ts_ms >= self.from_ms && ts_ms <= self.to_ms
    }
}
