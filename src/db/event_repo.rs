use sqlx::PgPool;

use crate::models::{Event, Instrument};

/// Fetch an event by its id.
pub async fn get_event(pool: &PgPool, event_id: &str) -> anyhow::Result<Option<Event>> {
    let event = sqlx::query_as::<_, Event>(
        r#"
        SELECT event_id, slug, title, category, image, active,
               liquidity, volume, volume_24hr, updated_at
        FROM events
        WHERE event_id = $1
        "#,
    )
    .bind(event_id)
    .fetch_optional(pool)
    .await?;

    Ok(event)
}

/// Fetch a single instrument.
pub async fn get_instrument(
    pool: &PgPool,
    instrument_id: &str,
) -> anyhow::Result<Option<Instrument>> {
    let instrument = sqlx::query_as::<_, Instrument>(
        r#"
        SELECT instrument_id, event_id, question, last_price, active
        FROM instruments
        WHERE instrument_id = $1
        "#,
    )
    .bind(instrument_id)
    .fetch_optional(pool)
    .await?;

    Ok(instrument)
}

/// All instruments of an event in stable enumeration order.
pub async fn list_instruments_of_event(
    pool: &PgPool,
    event_id: &str,
) -> anyhow::Result<Vec<Instrument>> {
    let rows = sqlx::query_as::<_, Instrument>(
        r#"
        SELECT instrument_id, event_id, question, last_price, active
        FROM instruments
        WHERE event_id = $1
        ORDER BY instrument_id ASC
        "#,
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Ids of active events, highest 24h volume first.
pub async fn list_active_events(pool: &PgPool, limit: i64) -> anyhow::Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT event_id
        FROM events
        WHERE active = true
        ORDER BY volume_24hr DESC NULLS LAST, event_id ASC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.0).collect())
}
