//! Prometheus metrics

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Time spent walking every page of one fetch
pub const FETCH_DURATION: &str = "movers_fetch_duration_seconds";
/// Assets returned by the most recent successful fetch
pub const FETCHED_ASSETS: &str = "movers_fetched_assets";
/// Fetches aborted by a failing page
pub const FETCH_FAILURES: &str = "movers_fetch_failures_total";

/// Install the Prometheus exporter, serving `/metrics` on `port`
pub fn init_metrics(port: u16) -> anyhow::Result<SocketAddr> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("Failed to install Prometheus exporter")?;

    Ok(addr)
}

/// Record a completed fetch
pub fn record_fetch_success(duration: Duration, assets: usize) {
    ::metrics::histogram!(FETCH_DURATION).record(duration.as_secs_f64());
    ::metrics::gauge!(FETCHED_ASSETS).set(assets as f64);
}

/// Record a fetch that was aborted
pub fn record_fetch_failure() {
    ::metrics::counter!(FETCH_FAILURES).increment(1);
}
