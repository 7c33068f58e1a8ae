pub mod baseline_repo;
pub mod event_repo;
pub mod geo_repo;
pub mod memory;
pub mod pg;
pub mod score_repo;
pub mod snapshot_repo;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::models::{
    Baseline, Event, EventGeo, Instrument, MaterializedScore, PriceSnapshot, ScoreWindow, TimeRange,
};

pub use memory::MemoryStore;
pub use pg::PgStore;

pub async fn init_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    // Verify connectivity
    sqlx::query("SELECT 1").execute(&pool).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

// ---------------------------------------------------------------------------
// Collaborator interfaces (read-only from this crate)
// ---------------------------------------------------------------------------

/// Append-only price history, written by ingestion.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Snapshots of one instrument inside `range`, ordered by timestamp.
    async fn list_for_instrument(
        &self,
        instrument_id: &str,
        range: TimeRange,
    ) -> anyhow::Result<Vec<PriceSnapshot>>;

    /// Snapshots of every instrument of an event inside `range`, ordered by timestamp.
    async fn list_for_event(
        &self,
        event_id: &str,
        range: TimeRange,
    ) -> anyhow::Result<Vec<PriceSnapshot>>;

    async fn latest_at_or_before(
        &self,
        instrument_id: &str,
        ts_ms: i64,
    ) -> anyhow::Result<Option<PriceSnapshot>>;

    async fn earliest_at_or_after(
        &self,
        instrument_id: &str,
        ts_ms: i64,
    ) -> anyhow::Result<Option<PriceSnapshot>>;
}

/// Event and instrument metadata.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn ping(&self) -> anyhow::Result<()>;

    async fn get_event(&self, event_id: &str) -> anyhow::Result<Option<Event>>;

    async fn get_instrument(&self, instrument_id: &str) -> anyhow::Result<Option<Instrument>>;

    async fn list_instruments_of_event(&self, event_id: &str) -> anyhow::Result<Vec<Instrument>>;

    /// Ids of active events, at most `limit`.
    async fn list_active_events(&self, limit: i64) -> anyhow::Result<Vec<String>>;
}

// ---------------------------------------------------------------------------
// Caches owned by this crate
// ---------------------------------------------------------------------------

/// Materialized scores keyed by `(event_id, window)`. Last write wins.
#[async_trait]
pub trait ScoreCache: Send + Sync {
    async fn upsert_score(&self, score: &MaterializedScore) -> anyhow::Result<()>;

    async fn get_score(
        &self,
        event_id: &str,
        window: ScoreWindow,
    ) -> anyhow::Result<Option<MaterializedScore>>;

    /// Highest scores first.
    async fn top_scores(
        &self,
        window: ScoreWindow,
        limit: usize,
    ) -> anyhow::Result<Vec<MaterializedScore>>;

    async fn scores_updated_since(
        &self,
        window: ScoreWindow,
        since: DateTime<Utc>,
    ) -> anyhow::Result<Vec<MaterializedScore>>;
}

#[async_trait]
pub trait GeoStore: Send + Sync {
    async fn get_geo(&self, event_id: &str) -> anyhow::Result<Option<EventGeo>>;

    /// Returns `false` when a row already existed; existing rows are never replaced.
    async fn insert_geo_if_absent(&self, geo: &EventGeo) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait BaselineStore: Send + Sync {
    async fn upsert_baseline(&self, baseline: &Baseline) -> anyhow::Result<()>;

    async fn get_baseline(&self, instrument_id: &str) -> anyhow::Result<Option<Baseline>>;
}

/// Handles to every store, shared by services and API handlers.
#[derive(Clone)]
pub struct Stores {
    pub snapshots: Arc<dyn SnapshotStore>,
    pub catalog: Arc<dyn CatalogStore>,
    pub scores: Arc<dyn ScoreCache>,
    pub geo: Arc<dyn GeoStore>,
    pub baselines: Arc<dyn BaselineStore>,
}

impl Stores {
    /// Use one backend for every concern.
    pub fn from_backend<S>(backend: Arc<S>) -> Self
    where
        S: SnapshotStore + CatalogStore + ScoreCache + GeoStore + BaselineStore + 'static,
    {
        Self {
            snapshots: backend.clone(),
            catalog: backend.clone(),
            scores: backend.clone(),
            geo: backend.clone(),
            baselines: backend,
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self::from_backend(Arc::new(PgStore::new(pool)))
    }
}
