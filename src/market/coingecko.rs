//! CoinGecko markets client
//!
//! Fetches pages of `/coins/markets`, ordered by descending market cap, with
//! the requested percentage-change windows attached to every record.

use super::{AssetSnapshot, ChangeWindow, FetchError, MarketSource};
use crate::config::UpstreamConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// CoinGecko public API base URL
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Largest page size the markets endpoint accepts
pub const MAX_PER_PAGE: u32 = 250;

/// Configuration for the CoinGecko client
#[derive(Debug, Clone)]
pub struct CoinGeckoConfig {
    /// Base URL for the API, without trailing slash
    pub base_url: String,
    /// Quote currency (e.g., "usd")
    pub currency: String,
    /// Records per page
    pub per_page: u32,
    /// Change windows requested via `price_change_percentage`
    pub windows: Vec<ChangeWindow>,
    /// Request timeout, unbounded when `None`
    pub timeout: Option<Duration>,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: COINGECKO_API_URL.to_string(),
            currency: "usd".to_string(),
            per_page: MAX_PER_PAGE,
            windows: ChangeWindow::ALL.to_vec(),
            timeout: None,
        }
    }
}

impl From<&UpstreamConfig> for CoinGeckoConfig {
    fn from(upstream: &UpstreamConfig) -> Self {
        Self {
            base_url: upstream.base_url.trim_end_matches('/').to_string(),
            currency: upstream.currency.clone(),
            per_page: upstream.per_page,
            windows: ChangeWindow::ALL.to_vec(),
            timeout: upstream.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Client for the CoinGecko markets endpoint
pub struct CoinGeckoClient {
    config: CoinGeckoConfig,
    client: Client,
}

impl CoinGeckoClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(CoinGeckoConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: CoinGeckoConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FetchError::Client)?;

        Ok(Self { config, client })
    }

    fn markets_url(&self) -> String {
        format!("{}/coins/markets", self.config.base_url)
    }

    /// Query parameters for one page request
    fn page_query(&self, page: u32) -> Vec<(&'static str, String)> {
        let windows = self
            .config
            .windows
            .iter()
            .map(|w| w.api_token())
            .collect::<Vec<_>>()
            .join(",");

        vec![
            ("vs_currency", self.config.currency.clone()),
            ("order", "market_cap_desc".to_string()),
            ("per_page", self.config.per_page.to_string()),
            ("page", page.to_string()),
            ("price_change_percentage", windows),
        ]
    }
}

#[async_trait]
impl MarketSource for CoinGeckoClient {
    async fn fetch_page(&self, page: u32) -> Result<Vec<AssetSnapshot>, FetchError> {
        let url = self.markets_url();

        tracing::debug!(url = %url, page, "Requesting CoinGecko markets page");

        let response = self
            .client
            .get(&url)
            .query(&self.page_query(page))
            .send()
            .await
            .map_err(|source| FetchError::Http { page, source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Http { page, source })?;

        if !status.is_success() {
            return Err(FetchError::Status { page, status, body });
        }

        serde_json::from_str(&body).map_err(|source| FetchError::Decode { page, source })
    }
}
