use chrono::Utc;

use crate::db::Stores;
use crate::errors::ScoringError;
use crate::intelligence::scorer::{
    instrument_movement, pick_start_snapshot, score_movements, window_volume,
};
use crate::models::{Instrument, MarketMovement, ScoreResult, TimeRange};

/// Score an event over the trailing `window_minutes`, ending now.
pub async fn compute_event_score(
    stores: &Stores,
    event_id: &str,
    window_minutes: i64,
) -> Result<ScoreResult, ScoringError> {
    let now_ms = Utc::now().timestamp_millis();
    compute_event_score_at(stores, event_id, window_minutes, now_ms).await
}

/// Score an event over `[now_ms - window, now_ms]`.
///
/// Fails only when the event has no instruments or the instrument listing
/// itself cannot be read. Per-instrument read failures drop that instrument.
pub async fn compute_event_score_at(
    stores: &Stores,
    event_id: &str,
    window_minutes: i64,
    now_ms: i64,
) -> Result<ScoreResult, ScoringError> {
    let instruments = stores.catalog.list_instruments_of_event(event_id).await?;
    if instruments.is_empty() {
        return Err(ScoringError::NoInstruments {
            event_id: event_id.to_string(),
        });
    }

    let range = TimeRange::new(now_ms - window_minutes * 60_000, now_ms);
    let mut movements = Vec::with_capacity(instruments.len());

    for instrument in &instruments {
        match movement_in_window(stores, instrument, range).await {
            Ok(Some(movement)) => movements.push(movement),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    event_id = %event_id,
                    instrument_id = %instrument.instrument_id,
                    "Skipping instrument: snapshot read failed"
                );
            }
        }
    }

    Ok(score_movements(event_id, window_minutes, movements, now_ms))
}

async fn movement_in_window(
    stores: &Stores,
    instrument: &Instrument,
    range: TimeRange,
) -> anyhow::Result<Option<MarketMovement>> {
    let id = instrument.instrument_id.as_str();
    let snapshots = &stores.snapshots;

    let Some(end) = snapshots.latest_at_or_before(id, range.to_ms).await? else {
        return Ok(None);
    };

    let before = snapshots.latest_at_or_before(id, range.from_ms).await?;
    // A candidate past the window end is not a start point.
    let after = snapshots
        .earliest_at_or_after(id, range.from_ms)
        .await?
        .filter(|s| s.timestamp_ms <= range.to_ms);
    let start = pick_start_snapshot(before.as_ref(), after.as_ref(), range.from_ms);

    let in_window = snapshots.list_for_instrument(id, range).await?;
    let volume = window_volume(&in_window, range);

    Ok(instrument_movement(
        id,
        &instrument.question,
        start,
        Some(&end),
        volume,
    ))
}
