use std::env;

use crate::intelligence::baseline::DEFAULT_LOOKBACK_DAYS;
use crate::models::ScoreWindow;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// "json" switches the tracing formatter to JSON lines.
    pub log_format: String,

    // Score materializer
    pub materializer_enabled: bool,
    pub materializer_interval_secs: u64,
    pub materializer_batch_limit: i64,

    // Geo backfill
    pub geo_backfill_enabled: bool,
    pub geo_backfill_interval_secs: u64,
    pub geo_backfill_window: ScoreWindow,
    pub geo_backfill_since_hours: i64,
    pub geo_backfill_limit: usize,

    // Baselines
    pub baseline_enabled: bool,
    pub baseline_interval_secs: u64,
    pub baseline_lookback_days: i64,
    pub baseline_batch_limit: usize,

    // Read path
    pub top_tremors_default_limit: usize,

    /// Bearer token for admin routes. `None` disables the check.
    pub api_token: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".into()),

            materializer_enabled: env_or("MATERIALIZER_ENABLED", true),
            materializer_interval_secs: env_or("MATERIALIZER_INTERVAL_SECS", 60),
            materializer_batch_limit: env_or("MATERIALIZER_BATCH_LIMIT", 500),

            geo_backfill_enabled: env_or("GEO_BACKFILL_ENABLED", true),
            geo_backfill_interval_secs: env_or("GEO_BACKFILL_INTERVAL_SECS", 900),
            geo_backfill_window: env::var("GEO_BACKFILL_WINDOW")
                .unwrap_or_else(|_| "60m".into())
                .parse()
                .map_err(|e: String| anyhow::anyhow!("GEO_BACKFILL_WINDOW: {e}"))?,
            geo_backfill_since_hours: env_or("GEO_BACKFILL_SINCE_HOURS", 24),
            geo_backfill_limit: env_or("GEO_BACKFILL_LIMIT", 200),

            baseline_enabled: env_or("BASELINE_ENABLED", true),
            baseline_interval_secs: env_or("BASELINE_INTERVAL_SECS", 3600),
            baseline_lookback_days: env_or("BASELINE_LOOKBACK_DAYS", DEFAULT_LOOKBACK_DAYS),
            baseline_batch_limit: env_or("BASELINE_BATCH_LIMIT", 200),

            top_tremors_default_limit: env_or("TOP_TREMORS_DEFAULT_LIMIT", 20),

            api_token: env::var("API_TOKEN").ok().filter(|t| !t.trim().is_empty()),
        })
    }
}

/// Parse an env var, falling back to `default` when unset or malformed.
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
