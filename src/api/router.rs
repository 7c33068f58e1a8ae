use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::require_auth;
use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Read-only routes, no authentication
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render))
        // Scores
        .route("/api/tremors", get(handlers::tremors::list))
        .route(
            "/api/events/:event_id/score",
            get(handlers::scores::event_score),
        )
        .route(
            "/api/instruments/:instrument_id/baseline",
            get(handlers::baselines::detail),
        )
        // Geo
        .route("/api/geo/infer", get(handlers::geo::infer))
        .route("/api/geo/country", get(handlers::geo::country))
        .route("/api/geo/state", get(handlers::geo::state));

    // Admin triggers, Bearer token required when API_TOKEN is set
    let admin = Router::new()
        .route(
            "/api/admin/backfill-event-geo",
            post(handlers::admin::backfill_geo),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(admin)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
