mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use tower::ServiceExt;

use common::{memory_stores, score_row, seed_event, seed_score, test_state};

use seismo::api::router::create_router;
use seismo::db::MemoryStore;

async fn build_test_app(api_token: Option<&str>) -> (axum::Router, std::sync::Arc<MemoryStore>) {
    let (store, stores) = memory_stores();
    let router = create_router(test_state(stores, api_token));
    (router, store)
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn get(app: axum::Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _store) = build_test_app(None).await;

    let resp = get(app, "/health").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (app, _store) = build_test_app(None).await;

    let resp = get(app, "/metrics").await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_tremors_sorted() {
    let (app, store) = build_test_app(None).await;
    let now = Utc::now();
    seed_event(&store, "e-tx", "Governor of Texas", true);
    seed_event(&store, "e-de", "Election in Germany", true);
    seed_score(&store, score_row("e-de", 2.5, now)).await;
    seed_score(&store, score_row("e-tx", 8.0, now)).await;

    let resp = get(app, "/api/tremors?window=60m&limit=10").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["success"], true);
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["event_id"], "e-tx");
    assert_eq!(data[0]["window"], "60m");
    assert_eq!(data[0]["geo"]["region"], "Texas");
    assert_eq!(data[1]["geo"]["country"], "Germany");
}

#[tokio::test]
async fn test_tremors_rejects_unknown_window() {
    let (app, _store) = build_test_app(None).await;

    let resp = get(app, "/api/tremors?window=7m").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = body_json(resp).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_event_score_on_demand() {
    let (app, store) = build_test_app(None).await;
    common::seed_texas_event(&store, Utc::now().timestamp_millis());

    let resp = get(app, "/api/events/e-tx/score?window_minutes=60").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["data"]["seismo_score"], 7.6);
    assert_eq!(json["data"]["top_instrument_id"], "tx-a");
}

#[tokio::test]
async fn test_event_score_insufficient_data() {
    let (app, store) = build_test_app(None).await;
    seed_event(&store, "empty", "No instruments", true);

    let resp = get(app, "/api/events/empty/score").await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_baseline_not_found() {
    let (app, _store) = build_test_app(None).await;

    let resp = get(app, "/api/instruments/nope/baseline").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_geo_infer_and_country() {
    let (app, _store) = build_test_app(None).await;

    let resp = get(app.clone(), "/api/geo/infer?title=Governor%20of%20Texas").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["data"]["region"], "Texas");
    assert_eq!(json["data"]["confidence"], "high");

    let uri = "/api/geo/infer?title=Will%20bitcoin%20hit%20200k";
    let resp = get(app.clone(), uri).await;
    let json = body_json(resp).await;
    assert!(json["data"].is_null());

    let resp = get(app, "/api/geo/country?q=holland").await;
    let json = body_json(resp).await;
    assert_eq!(json["data"], "Netherlands");
}

#[tokio::test]
async fn test_admin_backfill_requires_token() {
    let (app, store) = build_test_app(Some("secret")).await;
    seed_event(&store, "e-tx", "Governor of Texas", true);
    seed_score(&store, score_row("e-tx", 5.0, Utc::now())).await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/backfill-event-geo")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/backfill-event-geo?window=60m&since_hours=24&limit=50")
                .header("authorization", "Bearer secret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["data"]["considered"], 1);
    assert_eq!(json["data"]["inserted"], 1);
    assert_eq!(store.geo_count(), 1);
}

async fn post(app: axum::Router, uri: &str) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_admin_backfill_bounds_query() {
    let (app, store) = build_test_app(None).await;
    let now = Utc::now();
    for (id, title) in [("e-tx", "Governor of Texas"), ("e-de", "Election in Germany")] {
        seed_event(&store, id, title, true);
        seed_score(&store, score_row(id, 5.0, now)).await;
    }

    for since_hours in ["-1", "100000000000", "9223372036854775807"] {
        let uri = format!("/api/admin/backfill-event-geo?since_hours={since_hours}");
        let resp = post(app.clone(), &uri).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{since_hours}");
    }
    assert_eq!(store.geo_count(), 0);

    // limit=0 is raised to one event per batch
    let resp = post(app.clone(), "/api/admin/backfill-event-geo?limit=0").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["data"]["considered"], 1);

    let uri = format!("/api/admin/backfill-event-geo?limit={}", usize::MAX);
    let resp = post(app, &uri).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["data"]["considered"], 2);
    assert_eq!(store.geo_count(), 2);
}

#[tokio::test]
async fn test_us_state_lookup() {
    let (app, _store) = build_test_app(None).await;

    let resp = get(app.clone(), "/api/geo/state?q=north%20carolina%20senate").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["data"]["region"], "North Carolina");
    assert_eq!(json["data"]["confidence"], "high");

    let resp = get(app.clone(), "/api/geo/state?q=PA-07").await;
    let json = body_json(resp).await;
    assert_eq!(json["data"]["region"], "Pennsylvania");
    assert_eq!(json["data"]["confidence"], "medium");

    let resp = get(app, "/api/geo/state?q=Germany").await;
    let json = body_json(resp).await;
    assert!(json["data"].is_null());
}

#[tokio::test]
async fn test_public_routes_ignore_token() {
    let (app, _store) = build_test_app(Some("secret")).await;

    let resp = get(app, "/api/geo/country?q=UK").await;
    assert_eq!(resp.status(), StatusCode::OK);
}
