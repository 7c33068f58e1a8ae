use std::time::Instant;

use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use serde::Serialize;
use tokio::time::{interval, Duration};

use crate::db::Stores;
use crate::models::{MaterializedScore, ScoreWindow};
use crate::services::event_score::compute_event_score_at;

/// Counts from one materialization cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaterializeReport {
    pub events: usize,
    pub upserted: usize,
    pub insufficient: usize,
    pub failed: usize,
}

/// Periodically refresh the score cache for every active event.
pub async fn run_score_materializer(stores: Stores, interval_secs: u64, batch_limit: i64) {
    tracing::info!(interval_secs, batch_limit, "Score materializer started");

    let mut ticker = interval(Duration::from_secs(interval_secs));

    loop {
        ticker.tick().await;

        if let Err(e) = materialize_once(&stores, batch_limit).await {
            tracing::error!(error = %e, "Score materializer: cycle failed");
        }
    }
}

pub async fn materialize_once(
    stores: &Stores,
    batch_limit: i64,
) -> anyhow::Result<MaterializeReport> {
    materialize_once_at(stores, batch_limit, Utc::now()).await
}

/// One cycle: every active event (up to `batch_limit`) times every window.
///
/// Only the active-event listing can fail the cycle. A failure on one
/// `(event, window)` pair is logged, counted and skipped.
pub async fn materialize_once_at(
    stores: &Stores,
    batch_limit: i64,
    now: DateTime<Utc>,
) -> anyhow::Result<MaterializeReport> {
    let started = Instant::now();
    let event_ids = stores.catalog.list_active_events(batch_limit).await?;

    let mut report = MaterializeReport {
        events: event_ids.len(),
        ..Default::default()
    };

    for event_id in &event_ids {
        for window in ScoreWindow::ALL {
            let result =
                compute_event_score_at(stores, event_id, window.minutes(), now.timestamp_millis())
                    .await;

            let score = match result {
                Ok(score) => score,
                Err(e) if e.is_insufficient_data() => {
                    tracing::debug!(
                        event_id = %event_id,
                        window = %window,
                        reason = %e,
                        "No score"
                    );
                    report.insufficient += 1;
                    continue;
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        event_id = %event_id,
                        window = %window,
                        "Score computation failed"
                    );
                    counter!("score_failures_total").increment(1);
                    report.failed += 1;
                    continue;
                }
            };

            let row = MaterializedScore::from_result(score, window, now);
            match stores.scores.upsert_score(&row).await {
                Ok(()) => {
                    counter!("scores_materialized_total").increment(1);
                    report.upserted += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        event_id = %event_id,
                        window = %window,
                        "Score upsert failed"
                    );
                    counter!("score_failures_total").increment(1);
                    report.failed += 1;
                }
            }
        }
    }

    histogram!("materialize_cycle_seconds").record(started.elapsed().as_secs_f64());

    tracing::info!(
        events = report.events,
        upserted = report.upserted,
        insufficient = report.insufficient,
        failed = report.failed,
        "Score materialization complete"
    );

    Ok(report)
}
