pub mod baseline;
pub mod geo;
pub mod market;
pub mod score;
pub mod snapshot;

pub use baseline::Baseline;
pub use geo::{EventGeo, GeoConfidence, GeoResult, GeoSource};
pub use market::{Event, Instrument};
pub use score::{MarketMovement, MaterializedScore, ScoreResult, ScoreWindow};
pub use snapshot::{PriceSnapshot, TimeRange};
