use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use metrics::counter;
use serde::Serialize;
use tokio::time::{interval, Duration};

use crate::db::Stores;
use crate::models::{EventGeo, GeoSource, MaterializedScore, ScoreWindow};
use crate::services::geo_service::GeoService;

#[derive(Debug, Clone, Copy)]
pub struct BackfillParams {
    pub window: ScoreWindow,
    pub since_hours: i64,
    pub limit: usize,
}

impl Default for BackfillParams {
    fn default() -> Self {
        Self {
            window: ScoreWindow::OneHour,
            since_hours: 24,
            limit: 200,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackfillReport {
    pub considered: usize,
    pub inserted: usize,
    pub skipped: usize,
}

/// Persist inferred geo for recently scored events that have none yet.
///
/// Candidates are the newest score row per event in `params.window` updated
/// within `params.since_hours`, newest first, capped at `params.limit`.
/// Existing geo rows are never touched, so a repeated run inserts nothing new.
pub async fn backfill_event_geo(
    stores: &Stores,
    geo: &GeoService,
    params: BackfillParams,
) -> anyhow::Result<BackfillReport> {
    let since = ChronoDuration::try_hours(params.since_hours)
        .and_then(|lookback| Utc::now().checked_sub_signed(lookback))
        .ok_or_else(|| anyhow::anyhow!("since_hours out of range: {}", params.since_hours))?;
    let rows = stores
        .scores
        .scores_updated_since(params.window, since)
        .await?;
    let candidates = latest_per_event(rows, params.limit);

    let mut report = BackfillReport {
        considered: candidates.len(),
        ..Default::default()
    };

    for score in &candidates {
        match backfill_one(stores, geo, score).await {
            Ok(true) => report.inserted += 1,
            Ok(false) => report.skipped += 1,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    event_id = %score.event_id,
                    "Geo backfill failed for event"
                );
                report.skipped += 1;
            }
        }
    }

    counter!("geo_backfill_inserted_total").increment(report.inserted as u64);
    tracing::info!(
        window = %params.window,
        considered = report.considered,
        inserted = report.inserted,
        skipped = report.skipped,
        "Geo backfill complete"
    );

    Ok(report)
}

/// Returns whether a new geo row was written.
async fn backfill_one(
    stores: &Stores,
    geo: &GeoService,
    score: &MaterializedScore,
) -> anyhow::Result<bool> {
    if stores.geo.get_geo(&score.event_id).await?.is_some() {
        return Ok(false);
    }

    let Some(event) = stores.catalog.get_event(&score.event_id).await? else {
        return Ok(false);
    };

    let question = score.top_question.as_deref().unwrap_or_default();
    let Some(mut result) = geo.infer_for_event(&event.event_id, &event.title, question) else {
        return Ok(false);
    };
    result.source = GeoSource::Inferred;

    let row = EventGeo {
        event_id: event.event_id,
        geo: result,
        updated_at: Utc::now(),
    };
    stores.geo.insert_geo_if_absent(&row).await
}

fn latest_per_event(rows: Vec<MaterializedScore>, limit: usize) -> Vec<MaterializedScore> {
    let mut latest: HashMap<String, MaterializedScore> = HashMap::new();
    for row in rows {
        match latest.entry(row.event_id.clone()) {
            Entry::Occupied(mut slot) => {
                if row.updated_at > slot.get().updated_at {
                    slot.insert(row);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(row);
            }
        }
    }

    let mut candidates: Vec<MaterializedScore> = latest.into_values().collect();
    candidates.sort_by(|a, b| {
        b.updated_at
            .cmp(&a.updated_at)
            .then_with(|| a.event_id.cmp(&b.event_id))
    });
    candidates.truncate(limit);
    candidates
}

/// Periodically run the backfill with fixed parameters.
pub async fn run_geo_backfill(
    stores: Stores,
    geo: Arc<GeoService>,
    params: BackfillParams,
    interval_secs: u64,
) {
    tracing::info!(
        interval_secs,
        window = %params.window,
        since_hours = params.since_hours,
        limit = params.limit,
        "Geo backfill started"
    );

    let mut ticker = interval(Duration::from_secs(interval_secs));

    loop {
        ticker.tick().await;

        if let Err(e) = backfill_event_geo(&stores, &geo, params).await {
            tracing::error!(error = %e, "Geo backfill: cycle failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(event_id: &str, secs: i64) -> MaterializedScore {
        MaterializedScore {
            event_id: event_id.to_string(),
            window: ScoreWindow::OneHour,
            seismo_score: 1.0,
            top_instrument_id: None,
            top_question: None,
            top_prev_price: None,
            top_curr_price: None,
            top_change: 0.0,
            movements: Vec::new(),
            total_volume: 0.0,
            active_instruments: 0,
            updated_at: Utc.timestamp_opt(secs, 0).unwrap(),
        }
    }

    #[test]
    fn test_latest_per_event_dedups_and_caps() {
        let rows = vec![row("a", 10), row("b", 30), row("a", 20), row("c", 5)];
        let picked = latest_per_event(rows, 2);
        let ids: Vec<_> = picked
            .iter()
            .map(|r| (r.event_id.as_str(), r.updated_at.timestamp()))
            .collect();
        assert_eq!(ids, vec![("b", 30), ("a", 20)]);
    }
}
