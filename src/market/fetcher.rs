//! Sequential page fetcher
//!
//! Walks pages `1..=max_pages` one at a time with a fixed pause between
//! requests. The first failing page aborts the walk and discards everything
//! fetched so far; there is no retry.

use super::{AssetSnapshot, FetchError, MarketSource};
use crate::config::UpstreamConfig;
use crate::telemetry::{record_fetch_failure, record_fetch_success};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// How many pages to fetch and how long to pause between them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    /// Number of pages to request
    pub max_pages: u32,
    /// Pause between consecutive page requests
    pub page_delay: Duration,
}

impl Default for FetchPlan {
    fn default() -> Self {
        Self {
            max_pages: 4,
            page_delay: Duration::from_secs(1),
        }
    }
}

impl From<&UpstreamConfig> for FetchPlan {
    fn from(upstream: &UpstreamConfig) -> Self {
        Self {
            max_pages: upstream.max_pages,
            page_delay: Duration::from_millis(upstream.page_delay_ms),
        }
    }
}

/// Fetches every configured page from a [`MarketSource`]
#[derive(Clone)]
pub struct PageFetcher {
    source: Arc<dyn MarketSource>,
    plan: FetchPlan,
}

impl PageFetcher {
    /// Create a fetcher over the given source
    pub fn new(source: Arc<dyn MarketSource>, plan: FetchPlan) -> Self {
        Self { source, plan }
    }

    /// Fetch plan in use
    pub fn plan(&self) -> &FetchPlan {
        &self.plan
    }

    /// Fetch all pages in order and concatenate them
    ///
    /// Stops early when a page comes back empty, since later pages would be
    /// empty too.
    pub async fn fetch_all(&self) -> Result<Vec<AssetSnapshot>, FetchError> {
        let started = Instant::now();
        let mut assets = Vec::new();

        for page in 1..=self.plan.max_pages {
            if page > 1 && !self.plan.page_delay.is_zero() {
                tokio::time::sleep(self.plan.page_delay).await;
            }

            tracing::info!(page, max_pages = self.plan.max_pages, "Fetching page");

            let batch = self.source.fetch_page(page).await?;
            if batch.is_empty() {
                tracing::debug!(page, "Empty page, no more market data");
                break;
            }
            assets.extend(batch);
        }

        let elapsed = started.elapsed();
        tracing::info!(
            assets = assets.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Fetched market data"
        );
        record_fetch_success(elapsed, assets.len());

        Ok(assets)
    }

    /// Fetch all pages, returning an empty list on any failure
    ///
    /// The underlying error is logged; callers only see that nothing came back.
    pub async fn fetch_top_assets(&self) -> Vec<AssetSnapshot> {
        match self.fetch_all().await {
            Ok(assets) => assets,
            Err(e) => {
                tracing::error!(error = %e, page = ?e.page(), "Error fetching market data");
                record_fetch_failure();
                Vec::new()
            }
        }
    }
}
