//! Configuration types for crypto-movers

use crate::market::{COINGECKO_API_URL, MAX_PER_PAGE};
use crate::ranking::DEFAULT_LIMIT;
use crate::telemetry::LogFormat;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

/// Root configuration structure
///
/// Every section is optional; defaults match the public CoinGecko endpoint
/// and the top 1000 assets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Dashboard HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` to bind, bracketing IPv6 literals
    pub fn bind_address(&self) -> String {
        match self.host.parse::<IpAddr>() {
            Ok(ip) => SocketAddr::new(ip, self.port).to_string(),
            Err(_) => format!("{}:{}", self.host, self.port),
        }
    }
}

/// Upstream market data API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Quote currency for prices and market caps
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Pages to fetch per request
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Records per page (upstream maximum is 250)
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Pause between page requests (milliseconds)
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Per-request timeout (seconds); unbounded when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    COINGECKO_API_URL.to_string()
}
fn default_currency() -> String {
    "usd".to_string()
}
fn default_max_pages() -> u32 {
    4
}
fn default_per_page() -> u32 {
    MAX_PER_PAGE
}
fn default_page_delay_ms() -> u64 {
    1000
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            currency: default_currency(),
            max_pages: default_max_pages(),
            per_page: default_per_page(),
            page_delay_ms: default_page_delay_ms(),
            timeout_secs: None,
        }
    }
}

/// Ranking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Gainers and losers shown per window
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus exporter port; no exporter when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content).context("Invalid configuration")?;
        Ok(config)
    }

    /// Reject settings the fetcher or ranker cannot work with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.upstream.currency.trim().is_empty() {
            anyhow::bail!("upstream.currency must not be empty");
        }
        if self.upstream.max_pages == 0 {
            anyhow::bail!("upstream.max_pages must be at least 1");
        }
        if !(1..=MAX_PER_PAGE).contains(&self.upstream.per_page) {
            anyhow::bail!(
                "upstream.per_page must be between 1 and {}, got {}",
                MAX_PER_PAGE,
                self.upstream.per_page
            );
        }
        if self.ranking.limit == 0 {
            anyhow::bail!("ranking.limit must be at least 1");
        }
        Ok(())
    }
}
