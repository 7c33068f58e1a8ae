pub mod baseline_refresher;
pub mod event_score;
pub mod geo_backfill;
pub mod geo_service;
pub mod materializer;
pub mod tremors;

pub use event_score::{compute_event_score, compute_event_score_at};
pub use geo_backfill::{backfill_event_geo, BackfillParams, BackfillReport};
pub use geo_service::GeoService;
pub use materializer::{materialize_once, MaterializeReport};
pub use tremors::{get_top_tremors, Tremor};
