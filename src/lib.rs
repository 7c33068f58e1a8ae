pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod intelligence;
pub mod metrics;
pub mod models;
pub mod services;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::Stores;
use crate::services::GeoService;

#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub geo: Arc<GeoService>,
    pub config: AppConfig,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
