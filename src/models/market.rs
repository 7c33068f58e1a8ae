use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database row for the events table. Written by ingestion, read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub event_id: String,
    pub slug: Option<String>,
    pub title: String,
    pub category: Option<String>,
    pub image: Option<String>,
    pub active: bool,
    pub liquidity: Option<Decimal>,
    pub volume: Option<Decimal>,
    pub volume_24hr: Option<Decimal>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Database row for the instruments table (one tradable outcome of an event).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Instrument {
    pub instrument_id: String,
    pub event_id: String,
    pub question: String,
    /// Last known implied probability in [0, 1].
    pub last_price: Option<f64>,
    pub active: bool,
}
