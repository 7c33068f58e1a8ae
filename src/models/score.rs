use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ScoreWindow
// ---------------------------------------------------------------------------

/// Trailing window over which change and volume are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreWindow {
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "60m")]
    OneHour,
    #[serde(rename = "1440m")]
    OneDay,
}

impl ScoreWindow {
    /// Windows refreshed by every materialization cycle.
    pub const ALL: [ScoreWindow; 3] = [
        ScoreWindow::FiveMinutes,
        ScoreWindow::OneHour,
        ScoreWindow::OneDay,
    ];

    pub fn minutes(&self) -> i64 {
        match self {
            ScoreWindow::FiveMinutes => 5,
            ScoreWindow::OneHour => 60,
            ScoreWindow::OneDay => 1440,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreWindow::FiveMinutes => "5m",
            ScoreWindow::OneHour => "60m",
            ScoreWindow::OneDay => "1440m",
        }
    }

    pub fn from_minutes(minutes: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.minutes() == minutes)
    }
}

impl fmt::Display for ScoreWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScoreWindow {
    type Err = String;

    /// Accepts the stored label ("60m") or a bare minute count ("60").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix('m').unwrap_or(trimmed);
        digits
            .parse::<i64>()
            .ok()
            .and_then(Self::from_minutes)
            .ok_or_else(|| format!("unsupported window '{s}' (expected 5m, 60m or 1440m)"))
    }
}

// ---------------------------------------------------------------------------
// MarketMovement
// ---------------------------------------------------------------------------

/// Per-instrument movement inside one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketMovement {
    pub instrument_id: String,
    pub question: String,
    pub prev_price: f64,
    pub curr_price: f64,
    /// Signed change in percentage points.
    pub change: f64,
    pub volume: f64,
}

// ---------------------------------------------------------------------------
// ScoreResult
// ---------------------------------------------------------------------------

/// On-demand score for one `(event, window)`; never stored as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    pub event_id: String,
    pub window_minutes: i64,
    /// Bounded intensity in [0, 10], one decimal.
    pub seismo_score: f64,
    pub top_instrument_id: Option<String>,
    pub top_question: Option<String>,
    pub top_prev_price: Option<f64>,
    pub top_curr_price: Option<f64>,
    /// Signed percentage-point change of the dominant mover.
    pub top_change: f64,
    pub top_volume: f64,
    pub base_score: f64,
    pub volume_multiplier: f64,
    /// Sorted by absolute change, largest first.
    pub movements: Vec<MarketMovement>,
    pub total_volume: f64,
    pub active_instruments: i32,
    pub computed_at_ms: i64,
}

// ---------------------------------------------------------------------------
// MaterializedScore
// ---------------------------------------------------------------------------

/// Cache row keyed by `(event_id, window)`, replaced on every cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterializedScore {
    pub event_id: String,
    pub window: ScoreWindow,
    pub seismo_score: f64,
    pub top_instrument_id: Option<String>,
    pub top_question: Option<String>,
    pub top_prev_price: Option<f64>,
    pub top_curr_price: Option<f64>,
    pub top_change: f64,
    pub movements: Vec<MarketMovement>,
    pub total_volume: f64,
    pub active_instruments: i32,
    pub updated_at: DateTime<Utc>,
}

impl MaterializedScore {
    pub fn from_result(
        result: ScoreResult,
        window: ScoreWindow,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id: result.event_id,
            window,
            seismo_score: result.seismo_score,
            top_instrument_id: result.top_instrument_id,
            top_question: result.top_question,
            top_prev_price: result.top_prev_price,
            top_curr_price: result.top_curr_price,
            top_change: result.top_change,
            movements: result.movements,
            total_volume: result.total_volume,
            active_instruments: result.active_instruments,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_parses_labels_and_minutes() {
        let five: ScoreWindow = "5m".parse().unwrap();
        assert_eq!(five, ScoreWindow::FiveMinutes);
        assert_eq!("60".parse::<ScoreWindow>().unwrap(), ScoreWindow::OneHour);
        let day: ScoreWindow = " 1440m ".parse().unwrap();
        assert_eq!(day, ScoreWindow::OneDay);
        assert!("15m".parse::<ScoreWindow>().is_err());
        assert!("abc".parse::<ScoreWindow>().is_err());
    }

    #[test]
    fn test_window_serializes_as_label() {
        let json = serde_json::to_string(&ScoreWindow::OneHour).unwrap();
        assert_eq!(json, "\"60m\"");
    }
}
