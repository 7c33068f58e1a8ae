use chrono::{Duration as ChronoDuration, Utc};
use metrics::counter;
use tokio::time::{interval, Duration};

use crate::db::Stores;
use crate::errors::ScoringError;
use crate::intelligence::baseline::compute_baseline;
use crate::models::{Baseline, TimeRange};

/// Recompute and upsert the baseline for one instrument from the last
/// `lookback_days` of snapshots. The previous row is replaced.
pub async fn refresh_baseline(
    stores: &Stores,
    instrument_id: &str,
    lookback_days: i64,
) -> Result<Baseline, ScoringError> {
    let now = Utc::now();
    let from = now - ChronoDuration::days(lookback_days);
    let range = TimeRange::new(from.timestamp_millis(), now.timestamp_millis());

    let snapshots = stores
        .snapshots
        .list_for_instrument(instrument_id, range)
        .await?;
    let baseline = compute_baseline(instrument_id, &snapshots, lookback_days, now)?;

    stores.baselines.upsert_baseline(&baseline).await?;
    counter!("baselines_refreshed_total").increment(1);

    Ok(baseline)
}

/// Periodically refresh baselines for the instruments of active events.
pub async fn run_baseline_refresher(
    stores: Stores,
    interval_secs: u64,
    lookback_days: i64,
    batch_limit: usize,
) {
    tracing::info!(
        interval_secs,
        lookback_days,
        batch_limit,
        "Baseline refresher started"
    );

    let mut ticker = interval(Duration::from_secs(interval_secs));

    loop {
        ticker.tick().await;

        let cycle = refresh_active_baselines(&stores, lookback_days, batch_limit);
        match cycle.await {
            Ok(refreshed) => tracing::info!(refreshed, "Baseline refresh complete"),
            Err(e) => tracing::error!(error = %e, "Baseline refresher: cycle failed"),
        }
    }
}

/// Returns the number of baselines written this cycle.
pub async fn refresh_active_baselines(
    stores: &Stores,
    lookback_days: i64,
    batch_limit: usize,
) -> anyhow::Result<usize> {
    let event_ids = stores.catalog.list_active_events(batch_limit as i64).await?;

    let mut instrument_ids = Vec::new();
    for event_id in &event_ids {
        match stores.catalog.list_instruments_of_event(event_id).await {
            Ok(instruments) => {
                instrument_ids.extend(instruments.into_iter().map(|i| i.instrument_id));
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    event_id = %event_id,
                    "Baseline refresher: instrument listing failed"
                );
            }
        }
        if instrument_ids.len() >= batch_limit {
            break;
        }
    }
    instrument_ids.truncate(batch_limit);

    let mut refreshed = 0;
    for instrument_id in &instrument_ids {
        match refresh_baseline(stores, instrument_id, lookback_days).await {
            Ok(_) => refreshed += 1,
            Err(e) if e.is_insufficient_data() => {
                tracing::debug!(instrument_id = %instrument_id, reason = %e, "No baseline");
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    instrument_id = %instrument_id,
                    "Baseline refresh failed"
                );
            }
        }
    }

    Ok(refreshed)
}
