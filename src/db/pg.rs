use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{
    baseline_repo, event_repo, geo_repo, score_repo, snapshot_repo, BaselineStore, CatalogStore,
    GeoStore, ScoreCache, SnapshotStore,
};
use crate::models::{
    Baseline, Event, EventGeo, Instrument, MaterializedScore, PriceSnapshot, ScoreWindow, TimeRange,
};

/// Postgres-backed implementation of every store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnapshotStore for PgStore {
    async fn list_for_instrument(
        &self,
        instrument_id: &str,
        range: TimeRange,
    ) -> anyhow::Result<Vec<PriceSnapshot>> {
        snapshot_repo::list_for_instrument(&self.pool, instrument_id, range)
            .await
    }

    async fn list_for_event(
        &self,
        event_id: &str,
        range: TimeRange,
    ) -> anyhow::Result<Vec<PriceSnapshot>> {
        snapshot_repo::list_for_event(&self.pool, event_id, range)
            .await
    }

    async fn latest_at_or_before(
        &self,
        instrument_id: &str,
        ts_ms: i64,
    ) -> anyhow::Result<Option<PriceSnapshot>> {
        snapshot_repo::latest_at_or_before(&self.pool, instrument_id, ts_ms)
            .await
    }

    async fn earliest_at_or_after(
        &self,
        instrument_id: &str,
        ts_ms: i64,
    ) -> anyhow::Result<Option<PriceSnapshot>> {
        snapshot_repo::earliest_at_or_after(&self.pool, instrument_id, ts_ms)
            .await
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn get_event(&self, event_id: &str) -> anyhow::Result<Option<Event>> {
        event_repo::get_event(&self.pool, event_id).await
    }

    async fn get_instrument(&self, instrument_id: &str) -> anyhow::Result<Option<Instrument>> {
        event_repo::get_instrument(&self.pool, instrument_id).await
    }

    async fn list_instruments_of_event(&self, event_id: &str) -> anyhow::Result<Vec<Instrument>> {
        event_repo::list_instruments_of_event(&self.pool, event_id)
            .await
    }

    async fn list_active_events(&self, limit: i64) -> anyhow::Result<Vec<String>> {
        event_repo::list_active_events(&self.pool, limit).await
    }
}

#[async_trait]
impl ScoreCache for PgStore {
    async fn upsert_score(&self, score: &MaterializedScore) -> anyhow::Result<()> {
        score_repo::upsert_score(&self.pool, score).await
    }

    async fn get_score(
        &self,
        event_id: &str,
        window: ScoreWindow,
    ) -> anyhow::Result<Option<MaterializedScore>> {
        score_repo::get_score(&self.pool, event_id, window).await
    }

    async fn top_scores(
        &self,
        window: ScoreWindow,
        limit: usize,
    ) -> anyhow::Result<Vec<MaterializedScore>> {
        score_repo::top_scores(&self.pool, window, limit).await
    }

    async fn scores_updated_since(
        &self,
        window: ScoreWindow,
        since: DateTime<Utc>,
    ) -> anyhow::Result<Vec<MaterializedScore>> {
        score_repo::scores_updated_since(&self.pool, window, since)
            .await
    }
}

#[async_trait]
impl GeoStore for PgStore {
    async fn get_geo(&self, event_id: &str) -> anyhow::Result<Option<EventGeo>> {
        geo_repo::get_geo(&self.pool, event_id).await
    }

    async fn insert_geo_if_absent(&self, geo: &EventGeo) -> anyhow::Result<bool> {
        geo_repo::insert_geo_if_absent(&self.pool, geo).await
    }
}

#[async_trait]
impl BaselineStore for PgStore {
    async fn upsert_baseline(&self, baseline: &Baseline) -> anyhow::Result<()> {
        baseline_repo::upsert_baseline(&self.pool, baseline).await
    }

    async fn get_baseline(&self, instrument_id: &str) -> anyhow::Result<Option<Baseline>> {
        baseline_repo::get_baseline(&self.pool, instrument_id).await
    }
}
