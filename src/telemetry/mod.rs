//! Telemetry module
//!
//! Logging and metrics

mod logging;
mod metrics;

pub use logging::{init_logging, LogFormat};
pub use metrics::{
    init_metrics, record_fetch_failure, record_fetch_success, FETCHED_ASSETS, FETCH_DURATION,
    FETCH_FAILURES,
};

use crate::config::TelemetryConfig;
use std::net::SocketAddr;

/// Handle describing the telemetry subsystems that were started
#[derive(Debug)]
pub struct TelemetryGuard {
    metrics_addr: Option<SocketAddr>,
}

impl TelemetryGuard {
    /// Address the Prometheus exporter listens on, if one was installed
    pub fn metrics_address(&self) -> Option<SocketAddr> {
        self.metrics_addr
    }
}

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    init_logging(&config.log_level, config.log_format)?;

    let metrics_addr = config.metrics_port.map(init_metrics).transpose()?;

    Ok(TelemetryGuard { metrics_addr })
}
