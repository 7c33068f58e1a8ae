use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::models::{MarketMovement, MaterializedScore, ScoreWindow};

/// Database row for the scores_lite table.
#[derive(Debug, FromRow)]
struct ScoreLiteRow {
    event_id: String,
    window_label: String,
    seismo_score: f64,
    top_instrument_id: Option<String>,
    top_question: Option<String>,
    top_prev_price: Option<f64>,
    top_curr_price: Option<f64>,
    top_change: f64,
    movements: Json<Vec<MarketMovement>>,
    total_volume: f64,
    active_instruments: i32,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ScoreLiteRow> for MaterializedScore {
    type Error = anyhow::Error;

    fn try_from(row: ScoreLiteRow) -> Result<Self, Self::Error> {
        let window = row
            .window_label
            .parse::<ScoreWindow>()
            .map_err(|e| anyhow::anyhow!("scores_lite row for {}: {e}", row.event_id))?;

        Ok(MaterializedScore {
            event_id: row.event_id,
            window,
            seismo_score: row.seismo_score,
            top_instrument_id: row.top_instrument_id,
            top_question: row.top_question,
            top_prev_price: row.top_prev_price,
            top_curr_price: row.top_curr_price,
            top_change: row.top_change,
            movements: row.movements.0,
            total_volume: row.total_volume,
            active_instruments: row.active_instruments,
            updated_at: row.updated_at,
        })
    }
}

const SCORE_COLUMNS: &str = r#"
    event_id, window_label, seismo_score, top_instrument_id, top_question,
    top_prev_price, top_curr_price, top_change, movements, total_volume,
    active_instruments, updated_at
"#;

fn into_scores(rows: Vec<ScoreLiteRow>) -> anyhow::Result<Vec<MaterializedScore>> {
    rows.into_iter().map(MaterializedScore::try_from).collect()
}

/// Replace the row for `(event_id, window)` in a single statement.
pub async fn upsert_score(pool: &PgPool, score: &MaterializedScore) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO scores_lite (
            event_id, window_label, seismo_score, top_instrument_id, top_question,
            top_prev_price, top_curr_price, top_change, movements, total_volume,
            active_instruments, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        ON CONFLICT (event_id, window_label) DO UPDATE
        SET seismo_score = EXCLUDED.seismo_score,
            top_instrument_id = EXCLUDED.top_instrument_id,
            top_question = EXCLUDED.top_question,
            top_prev_price = EXCLUDED.top_prev_price,
            top_curr_price = EXCLUDED.top_curr_price,
            top_change = EXCLUDED.top_change,
            movements = EXCLUDED.movements,
            total_volume = EXCLUDED.total_volume,
            active_instruments = EXCLUDED.active_instruments,
            updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(&score.event_id)
    .bind(score.window.label())
    .bind(score.seismo_score)
    .bind(&score.top_instrument_id)
    .bind(&score.top_question)
    .bind(score.top_prev_price)
    .bind(score.top_curr_price)
    .bind(score.top_change)
    .bind(Json(&score.movements))
    .bind(score.total_volume)
    .bind(score.active_instruments)
    .bind(score.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_score(
    pool: &PgPool,
    event_id: &str,
    window: ScoreWindow,
) -> anyhow::Result<Option<MaterializedScore>> {
    let row = sqlx::query_as::<_, ScoreLiteRow>(&format!(
        "SELECT {SCORE_COLUMNS} FROM scores_lite WHERE event_id = $1 AND window_label = $2"
    ))
    .bind(event_id)
    .bind(window.label())
    .fetch_optional(pool)
    .await?;

    row.map(MaterializedScore::try_from).transpose()
}

/// Top-N rows of a window by score, highest first.
pub async fn top_scores(
    pool: &PgPool,
    window: ScoreWindow,
    limit: usize,
) -> anyhow::Result<Vec<MaterializedScore>> {
    let rows = sqlx::query_as::<_, ScoreLiteRow>(&format!(
        r#"
        SELECT {SCORE_COLUMNS}
        FROM scores_lite
        WHERE window_label = $1
        ORDER BY seismo_score DESC, updated_at DESC
        LIMIT $2
        "#
    ))
    .bind(window.label())
    .bind(limit as i64)
    .fetch_all(pool)
    .await?;

    into_scores(rows)
}

/// Rows of a window refreshed at or after `since`, newest first.
pub async fn scores_updated_since(
    pool: &PgPool,
    window: ScoreWindow,
    since: DateTime<Utc>,
) -> anyhow::Result<Vec<MaterializedScore>> {
    let rows = sqlx::query_as::<_, ScoreLiteRow>(&format!(
        r#"
        SELECT {SCORE_COLUMNS}
        FROM scores_lite
        WHERE window_label = $1 AND updated_at >= $2
        ORDER BY updated_at DESC
        "#
    ))
    .bind(window.label())
    .bind(since)
    .fetch_all(pool)
    .await?;

    into_scores(rows)
}
