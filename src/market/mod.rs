//! Market data module
//!
//! Paginated retrieval of the top assets by market capitalization from the
//! CoinGecko markets endpoint

mod coingecko;
mod fetcher;
mod types;

pub use coingecko::{CoinGeckoClient, CoinGeckoConfig, COINGECKO_API_URL, MAX_PER_PAGE};
pub use fetcher::{FetchPlan, PageFetcher};
pub use types::{AssetSnapshot, ChangeWindow, FetchError};

use async_trait::async_trait;

/// A paged source of market snapshots ordered by descending market cap
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// Fetch a single 1-based page of snapshots
    async fn fetch_page(&self, page: u32) -> Result<Vec<AssetSnapshot>, FetchError>;
}
