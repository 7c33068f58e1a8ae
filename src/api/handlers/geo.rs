use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::ApiResponse;
use crate::errors::AppError;
use crate::models::GeoResult;
use crate::AppState;

#[derive(Deserialize)]
pub struct InferQuery {
    pub title: String,
    pub question: Option<String>,
}

/// Shared by the country and state lookups.
#[derive(Deserialize)]
pub struct LookupQuery {
    pub q: String,
}

/// GET /api/geo/infer: best-effort location for free text; `data` is null on no match
pub async fn infer(
    State(state): State<AppState>,
    Query(query): Query<InferQuery>,
) -> Result<Json<ApiResponse<Option<GeoResult>>>, AppError> {
    if query.title.trim().is_empty() {
        return Err(AppError::BadRequest("title must not be empty".into()));
    }
    let geo = state
        .geo
        .infer_geo(&query.title, query.question.as_deref().unwrap_or_default());
    Ok(Json(ApiResponse::ok(geo)))
}

/// GET /api/geo/country: canonical country name for a query
pub async fn country(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<ApiResponse<Option<String>>>, AppError> {
    let country = state.geo.resolve_country_name(&query.q);
    Ok(Json(ApiResponse::ok(country)))
}

/// GET /api/geo/state: US state named in a query, by name and then by abbreviation
pub async fn state(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<ApiResponse<Option<GeoResult>>>, AppError> {
    Ok(Json(ApiResponse::ok(state.geo.match_us_state(&query.q))))
}
