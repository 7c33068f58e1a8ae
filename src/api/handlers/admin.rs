use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::{parse_window, ApiResponse};
use crate::errors::AppError;
use crate::services::geo_backfill::{backfill_event_geo, BackfillParams, BackfillReport};
use crate::AppState;

const MAX_SINCE_HOURS: i64 = 24 * 365;
const MAX_LIMIT: usize = 1_000;

#[derive(Deserialize)]
pub struct BackfillQuery {
    pub window: Option<String>,
    pub since_hours: Option<i64>,
    pub limit: Option<usize>,
}

/// POST /api/admin/backfill-event-geo: run one geo backfill batch now
pub async fn backfill_geo(
    State(state): State<AppState>,
    Query(query): Query<BackfillQuery>,
) -> Result<Json<ApiResponse<BackfillReport>>, AppError> {
    let defaults = BackfillParams::default();
    let params = BackfillParams {
        window: parse_window(query.window.as_deref())?,
        since_hours: query.since_hours.unwrap_or(defaults.since_hours),
        limit: query.limit.unwrap_or(defaults.limit).clamp(1, MAX_LIMIT),
    };
    if !(0..=MAX_SINCE_HOURS).contains(&params.since_hours) {
        return Err(AppError::BadRequest(format!(
            "since_hours must be between 0 and {MAX_SINCE_HOURS}"
        )));
    }

    tracing::info!(
        window = %params.window,
        since_hours = params.since_hours,
        limit = params.limit,
        "Manual geo backfill requested"
    );

    let report = backfill_event_geo(&state.stores, &state.geo, params).await?;
    Ok(Json(ApiResponse::ok(report)))
}
