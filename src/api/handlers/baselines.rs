use axum::extract::{Path, State};
use axum::Json;

use super::ApiResponse;
use crate::errors::AppError;
use crate::models::Baseline;
use crate::AppState;

/// GET /api/instruments/{instrument_id}/baseline: last stored baseline
pub async fn detail(
    State(state): State<AppState>,
    Path(instrument_id): Path<String>,
) -> Result<Json<ApiResponse<Baseline>>, AppError> {
    let baseline = state
        .stores
        .baselines
        .get_baseline(&instrument_id)
        .await?
        .ok_or_else(|| AppError::NotFound("baseline not found".into()))?;

    Ok(Json(ApiResponse::ok(baseline)))
}
