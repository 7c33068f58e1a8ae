use sqlx::PgPool;

use crate::models::Baseline;

/// Replace the baseline row for an instrument. No history is kept.
pub async fn upsert_baseline(pool: &PgPool, baseline: &Baseline) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO baselines (
            instrument_id, mean_return, std_return, avg_volume,
            sample_count, lookback_days, computed_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (instrument_id) DO UPDATE
        SET mean_return = EXCLUDED.mean_return,
            std_return = EXCLUDED.std_return,
            avg_volume = EXCLUDED.avg_volume,
            sample_count = EXCLUDED.sample_count,
            lookback_days = EXCLUDED.lookback_days,
            computed_at = EXCLUDED.computed_at
        "#,
    )
    .bind(&baseline.instrument_id)
    .bind(baseline.mean_return)
    .bind(baseline.std_return)
    .bind(baseline.avg_volume)
    .bind(baseline.sample_count)
    .bind(baseline.lookback_days)
    .bind(baseline.computed_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_baseline(pool: &PgPool, instrument_id: &str) -> anyhow::Result<Option<Baseline>> {
    let row = sqlx::query_as::<_, Baseline>("SELECT * FROM baselines WHERE instrument_id = $1")
        .bind(instrument_id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}
