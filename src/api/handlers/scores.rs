use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use super::ApiResponse;
use crate::errors::AppError;
use crate::models::ScoreResult;
use crate::services::event_score::compute_event_score;
use crate::AppState;

/// One week.
const MAX_WINDOW_MINUTES: i64 = 10_080;

#[derive(Deserialize)]
pub struct ScoreQuery {
    pub window_minutes: Option<i64>,
}

/// GET /api/events/{event_id}/score: compute a score on demand
pub async fn event_score(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Query(query): Query<ScoreQuery>,
) -> Result<Json<ApiResponse<ScoreResult>>, AppError> {
    let window_minutes = query.window_minutes.unwrap_or(60);
    if !(1..=MAX_WINDOW_MINUTES).contains(&window_minutes) {
        return Err(AppError::BadRequest(format!(
            "window_minutes must be between 1 and {MAX_WINDOW_MINUTES}"
        )));
    }

    let score = compute_event_score(&state.stores, &event_id, window_minutes)
        .await?;
    Ok(Json(ApiResponse::ok(score)))
}
