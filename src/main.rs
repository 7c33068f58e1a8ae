use std::sync::Arc;

use seismo::api::router::create_router;
use seismo::config::AppConfig;
use seismo::db::{self, Stores};
use seismo::services::baseline_refresher::run_baseline_refresher;
use seismo::services::geo_backfill::{run_geo_backfill, BackfillParams};
use seismo::services::materializer::run_score_materializer;
use seismo::services::GeoService;
use seismo::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(&config.log_format);

    let addr = format!("{}:{}", config.host, config.port);

    let metrics_handle = seismo::metrics::init_metrics()?;

    tracing::info!("Connecting to database...");
    let pool = db::init_pool(&config.database_url).await?;
    tracing::info!("Database connected");

    let stores = Stores::postgres(pool);
    let geo = Arc::new(GeoService::new());

    // --- Score materializer ---
    if config.materializer_enabled {
        tokio::spawn(run_score_materializer(
            stores.clone(),
            config.materializer_interval_secs,
            config.materializer_batch_limit,
        ));
    } else {
        tracing::info!("Score materializer disabled (MATERIALIZER_ENABLED=false)");
    }

    // --- Geo backfill ---
    if config.geo_backfill_enabled {
        let params = BackfillParams {
            window: config.geo_backfill_window,
            since_hours: config.geo_backfill_since_hours,
            limit: config.geo_backfill_limit,
        };
        tokio::spawn(run_geo_backfill(
            stores.clone(),
            geo.clone(),
            params,
            config.geo_backfill_interval_secs,
        ));
    } else {
        tracing::info!("Geo backfill disabled (GEO_BACKFILL_ENABLED=false)");
    }

    // --- Baselines ---
    if config.baseline_enabled {
        tokio::spawn(run_baseline_refresher(
            stores.clone(),
            config.baseline_interval_secs,
            config.baseline_lookback_days,
            config.baseline_batch_limit,
        ));
    } else {
        tracing::info!("Baseline refresher disabled (BASELINE_ENABLED=false)");
    }

    if config.api_token.is_none() {
        tracing::warn!("API_TOKEN is not set; admin routes are unauthenticated");
    }

    let state = AppState {
        stores,
        geo,
        config,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing(log_format: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
