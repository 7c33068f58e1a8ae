use sqlx::PgPool;

use crate::models::{PriceSnapshot, TimeRange};

const SNAPSHOT_COLUMNS: &str = "instrument_id, event_id, timestamp_ms, price01, volume_since_prev";

/// All snapshots of one instrument inside the inclusive range, oldest first.
pub async fn list_for_instrument(
    pool: &PgPool,
    instrument_id: &str,
    range: TimeRange,
) -> anyhow::Result<Vec<PriceSnapshot>> {
    let rows = sqlx::query_as::<_, PriceSnapshot>(&format!(
        r#"
        SELECT {SNAPSHOT_COLUMNS}
        FROM price_snapshots
        WHERE instrument_id = $1 AND timestamp_ms >= $2 AND timestamp_ms <= $3
        ORDER BY timestamp_ms ASC
        "#
    ))
    .bind(instrument_id)
    .bind(range.from_ms)
    .bind(range.to_ms)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// All snapshots of an event's instruments inside the inclusive range, oldest first.
pub async fn list_for_event(
    pool: &PgPool,
    event_id: &str,
    range: TimeRange,
) -> anyhow::Result<Vec<PriceSnapshot>> {
    let rows = sqlx::query_as::<_, PriceSnapshot>(&format!(
        r#"
        SELECT {SNAPSHOT_COLUMNS}
        FROM price_snapshots
        WHERE event_id = $1 AND timestamp_ms >= $2 AND timestamp_ms <= $3
        ORDER BY timestamp_ms ASC, instrument_id ASC
        "#
    ))
    .bind(event_id)
    .bind(range.from_ms)
    .bind(range.to_ms)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn latest_at_or_before(
    pool: &PgPool,
    instrument_id: &str,
    ts_ms: i64,
) -> anyhow::Result<Option<PriceSnapshot>> {
    let row = sqlx::query_as::<_, PriceSnapshot>(&format!(
        r#"
        SELECT {SNAPSHOT_COLUMNS}
        FROM price_snapshots
        WHERE instrument_id = $1 AND timestamp_ms <= $2
        ORDER BY timestamp_ms DESC
        LIMIT 1
        "#
    ))
    .bind(instrument_id)
    .bind(ts_ms)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn earliest_at_or_after(
    pool: &PgPool,
    instrument_id: &str,
    ts_ms: i64,
) -> anyhow::Result<Option<PriceSnapshot>> {
    let row = sqlx::query_as::<_, PriceSnapshot>(&format!(
        r#"
        SELECT {SNAPSHOT_COLUMNS}
        FROM price_snapshots
        WHERE instrument_id = $1 AND timestamp_ms >= $2
        ORDER BY timestamp_ms ASC
        LIMIT 1
        "#
    ))
    .bind(instrument_id)
    .bind(ts_ms)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
