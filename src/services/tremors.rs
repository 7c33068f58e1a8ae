use serde::Serialize;

use crate::db::Stores;
use crate::models::{Event, GeoResult, Instrument, MaterializedScore, ScoreWindow};
use crate::services::geo_service::GeoService;

/// A ranked score row joined with its event, dominant instrument and geo.
#[derive(Debug, Clone, Serialize)]
pub struct Tremor {
    #[serde(flatten)]
    pub score: MaterializedScore,
    pub event: Option<Event>,
    pub top_instrument: Option<Instrument>,
    pub geo: Option<GeoResult>,
}

/// Top `limit` cached scores for `window`, highest first.
///
/// Geo comes from the persisted cache when present; otherwise it is inferred
/// on the spot and memoized in `geo`, not persisted.
pub async fn get_top_tremors(
    stores: &Stores,
    geo: &GeoService,
    window: ScoreWindow,
    limit: usize,
) -> anyhow::Result<Vec<Tremor>> {
    let scores = stores.scores.top_scores(window, limit).await?;

    let mut tremors = Vec::with_capacity(scores.len());
    for score in scores {
        let event = stores.catalog.get_event(&score.event_id).await?;
        let top_instrument = match score.top_instrument_id.as_deref() {
            Some(id) => stores.catalog.get_instrument(id).await?,
            None => None,
        };

        let cached = stores.geo.get_geo(&score.event_id).await?;
        let geo_result = match (cached, &event) {
            (Some(row), _) => Some(row.geo),
            (None, Some(event)) => {
                let question = score
                    .top_question
                    .as_deref()
                    .or(top_instrument.as_ref().map(|i| i.question.as_str()))
                    .unwrap_or_default();
                geo.infer_for_event(&event.event_id, &event.title, question)
            }
            (None, None) => None,
        };

        tremors.push(Tremor {
            score,
            event,
            top_instrument,
            geo: geo_result,
        });
    }

    // Stable: equal scores keep the store's order.
    tremors.sort_by(|a, b| b.score.seismo_score.total_cmp(&a.score.seismo_score));
    Ok(tremors)
}
