use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How directly the matched text implied the location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoConfidence {
    High,
    Medium,
    Low,
}

impl GeoConfidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeoConfidence::High => "high",
            GeoConfidence::Medium => "medium",
            GeoConfidence::Low => "low",
        }
    }
}

impl fmt::Display for GeoConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeoConfidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(GeoConfidence::High),
            "medium" => Ok(GeoConfidence::Medium),
            "low" => Ok(GeoConfidence::Low),
            other => Err(format!("unknown geo confidence '{other}'")),
        }
    }
}

/// Which part of the text produced the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoSource {
    Title,
    Question,
    Inferred,
    Unknown,
}

impl GeoSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeoSource::Title => "title",
            GeoSource::Question => "question",
            GeoSource::Inferred => "inferred",
            GeoSource::Unknown => "unknown",
        }
    }
}

impl fmt::Display for GeoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeoSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(GeoSource::Title),
            "question" => Ok(GeoSource::Question),
            "inferred" => Ok(GeoSource::Inferred),
            "unknown" => Ok(GeoSource::Unknown),
            other => Err(format!("unknown geo source '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoResult {
    pub lat: f64,
    pub lng: f64,
    pub region: Option<String>,
    pub country: Option<String>,
    pub confidence: GeoConfidence,
    pub source: GeoSource,
}

/// Persisted geo for one event. Inserted once, never overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventGeo {
    pub event_id: String,
    pub geo: GeoResult,
    pub updated_at: DateTime<Utc>,
}
