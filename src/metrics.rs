use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter as the global recorder and pre-register
/// every metric. The returned handle renders the scrape payload.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {e}"))?;

    // Counters appear in the scrape before their first increment.
    counter!("scores_materialized_total").absolute(0);
    counter!("score_failures_total").absolute(0);
    counter!("geo_inferences_total").absolute(0);
    counter!("geo_cache_hits_total").absolute(0);
    counter!("geo_backfill_inserted_total").absolute(0);
    counter!("baselines_refreshed_total").absolute(0);

    // Histograms are created lazily on first record.
    histogram!("materialize_cycle_seconds").record(0.0);

    Ok(handle)
}

/// A handle backed by a recorder that is not installed globally. Renders an
/// empty payload; used where no exporter should be registered.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}
