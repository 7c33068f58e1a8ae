pub mod baseline;
pub mod geo;
pub mod scorer;

pub use baseline::compute_baseline;
pub use geo::{GeoMatcher, GeoRule, RULE_CASCADE};
pub use scorer::{score_movements, seismo_score};
