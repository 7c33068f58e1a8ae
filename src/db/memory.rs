use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use super::{BaselineStore, CatalogStore, GeoStore, ScoreCache, SnapshotStore};
use crate::models::{
    Baseline, Event, EventGeo, Instrument, MaterializedScore, PriceSnapshot, ScoreWindow, TimeRange,
};

/// In-process store. Every map entry is replaced atomically, so readers see
/// either the previous or the new value for a key.
///
/// Snapshot histories are kept sorted by timestamp so range and nearest
/// lookups are binary searches.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: DashMap<String, Event>,
    /// event_id -> instruments in enumeration order.
    instruments: DashMap<String, Vec<Instrument>>,
    /// instrument_id -> snapshots sorted by timestamp.
    snapshots: DashMap<String, Vec<PriceSnapshot>>,
    scores: DashMap<(String, ScoreWindow), MaterializedScore>,
    geo: DashMap<String, EventGeo>,
    baselines: DashMap<String, Baseline>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_event(&self, event: Event) {
        self.events.insert(event.event_id.clone(), event);
    }

    /// Add or replace an instrument, keeping the event's enumeration order.
    pub fn upsert_instrument(&self, instrument: Instrument) {
        let mut list = self
            .instruments
            .entry(instrument.event_id.clone())
            .or_default();
        match list
            .iter_mut()
            .find(|i| i.instrument_id == instrument.instrument_id)
        {
            Some(existing) => *existing = instrument,
            None => list.push(instrument),
        }
    }

    /// Append a snapshot. Out-of-order arrivals are inserted at their sorted position.
    pub fn append_snapshot(&self, snapshot: PriceSnapshot) {
        let mut history = self
            .snapshots
            .entry(snapshot.instrument_id.clone())
            .or_default();
        let idx = history.partition_point(|s| s.timestamp_ms <= snapshot.timestamp_ms);
        history.insert(idx, snapshot);
    }

    pub fn score_count(&self) -> usize {
        self.scores.len()
    }

    pub fn geo_count(&self) -> usize {
        self.geo.len()
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn list_for_instrument(
        &self,
        instrument_id: &str,
        range: TimeRange,
    ) -> anyhow::Result<Vec<PriceSnapshot>> {
        let Some(history) = self.snapshots.get(instrument_id) else {
            return Ok(Vec::new());
        };
        let start = history.partition_point(|s| s.timestamp_ms < range.from_ms);
        let end = history.partition_point(|s| s.timestamp_ms <= range.to_ms);
        Ok(history[start..end.max(start)].to_vec())
    }

    async fn list_for_event(
        &self,
        event_id: &str,
        range: TimeRange,
    ) -> anyhow::Result<Vec<PriceSnapshot>> {
        let instrument_ids: Vec<String> = self
            .instruments
            .get(event_id)
            .map(|list| list.iter().map(|i| i.instrument_id.clone()).collect())
            .unwrap_or_default();

        let mut out = Vec::new();
        for id in &instrument_ids {
            out.extend(self.list_for_instrument(id, range).await?);
        }
        out.sort_by_key(|s| s.timestamp_ms);
        Ok(out)
    }

    async fn latest_at_or_before(
        &self,
        instrument_id: &str,
        ts_ms: i64,
    ) -> anyhow::Result<Option<PriceSnapshot>> {
        let Some(history) = self.snapshots.get(instrument_id) else {
            return Ok(None);
        };
        let idx = history.partition_point(|s| s.timestamp_ms <= ts_ms);
        Ok(idx.checked_sub(1).map(|i| history[i].clone()))
    }

    async fn earliest_at_or_after(
        &self,
        instrument_id: &str,
        ts_ms: i64,
    ) -> anyhow::Result<Option<PriceSnapshot>> {
        let Some(history) = self.snapshots.get(instrument_id) else {
            return Ok(None);
        };
        let idx = history.partition_point(|s| s.timestamp_ms < ts_ms);
        Ok(history.get(idx).cloned())
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn get_event(&self, event_id: &str) -> anyhow::Result<Option<Event>> {
        Ok(self.events.get(event_id).map(|e| e.clone()))
    }

    async fn get_instrument(&self, instrument_id: &str) -> anyhow::Result<Option<Instrument>> {
        Ok(self.instruments.iter().find_map(|entry| {
            entry
                .value()
                .iter()
                .find(|i| i.instrument_id == instrument_id)
                .cloned()
        }))
    }

    async fn list_instruments_of_event(&self, event_id: &str) -> anyhow::Result<Vec<Instrument>> {
        Ok(self
            .instruments
            .get(event_id)
            .map(|list| list.clone())
            .unwrap_or_default())
    }

    async fn list_active_events(&self, limit: i64) -> anyhow::Result<Vec<String>> {
        let mut ids: Vec<String> = self
            .events
            .iter()
            .filter(|e| e.active)
            .map(|e| e.event_id.clone())
            .collect();
        ids.sort();
        ids.truncate(limit.max(0) as usize);
        Ok(ids)
    }
}

#[async_trait]
impl ScoreCache for MemoryStore {
    async fn upsert_score(&self, score: &MaterializedScore) -> anyhow::Result<()> {
        self.scores
            .insert((score.event_id.clone(), score.window), score.clone());
        Ok(())
    }

    async fn get_score(
        &self,
        event_id: &str,
        window: ScoreWindow,
    ) -> anyhow::Result<Option<MaterializedScore>> {
        Ok(self
            .scores
            .get(&(event_id.to_string(), window))
            .map(|s| s.clone()))
    }

    async fn top_scores(
        &self,
        window: ScoreWindow,
        limit: usize,
    ) -> anyhow::Result<Vec<MaterializedScore>> {
        let mut rows: Vec<MaterializedScore> = self
            .scores
            .iter()
            .filter(|s| s.window == window)
            .map(|s| s.clone())
            .collect();
        rows.sort_by(|a, b| {
            b.seismo_score
                .total_cmp(&a.seismo_score)
                .then(b.updated_at.cmp(&a.updated_at))
        });
        rows.truncate(limit);
        Ok(rows)
    }

    async fn scores_updated_since(
        &self,
        window: ScoreWindow,
        since: DateTime<Utc>,
    ) -> anyhow::Result<Vec<MaterializedScore>> {
        let mut rows: Vec<MaterializedScore> = self
            .scores
            .iter()
            .filter(|s| s.window == window && s.updated_at >= since)
            .map(|s| s.clone())
            .collect();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(rows)
    }
}

#[async_trait]
impl GeoStore for MemoryStore {
    async fn get_geo(&self, event_id: &str) -> anyhow::Result<Option<EventGeo>> {
        Ok(self.geo.get(event_id).map(|g| g.clone()))
    }

    async fn insert_geo_if_absent(&self, geo: &EventGeo) -> anyhow::Result<bool> {
        match self.geo.entry(geo.event_id.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Ok(false),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(geo.clone());
                Ok(true)
            }
        }
    }
}

#[async_trait]
impl BaselineStore for MemoryStore {
    async fn upsert_baseline(&self, baseline: &Baseline) -> anyhow::Result<()> {
        self.baselines
            .insert(baseline.instrument_id.clone(), baseline.clone());
        Ok(())
    }

    async fn get_baseline(&self, instrument_id: &str) -> anyhow::Result<Option<Baseline>> {
        Ok(self.baselines.get(instrument_id).map(|b| b.clone()))
    }
}
