use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::{parse_window, ApiResponse};
use crate::errors::AppError;
use crate::services::tremors::{get_top_tremors, Tremor};
use crate::AppState;

const MAX_LIMIT: usize = 200;

#[derive(Deserialize)]
pub struct TremorsQuery {
    pub window: Option<String>,
    pub limit: Option<usize>,
}

/// GET /api/tremors: highest scoring events for a window
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<TremorsQuery>,
) -> Result<Json<ApiResponse<Vec<Tremor>>>, AppError> {
    let window = parse_window(query.window.as_deref())?;
    let limit = query
        .limit
        .unwrap_or(state.config.top_tremors_default_limit)
        .clamp(1, MAX_LIMIT);

    let tremors = get_top_tremors(&state.stores, &state.geo, window, limit)
        .await?;
    Ok(Json(ApiResponse::ok(tremors)))
}
