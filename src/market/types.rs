//! Market data types

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One asset's market data at fetch time
///
/// Mirrors the subset of the CoinGecko `/coins/markets` record we consume.
/// Every numeric field except the identity strings may be absent or `null`.
/// Numbers outside the `Decimal` range decode as `None` rather than failing
/// the whole page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    /// Upstream identifier (e.g., "bitcoin")
    pub id: String,
    /// Display name
    pub name: String,
    /// Ticker symbol, lower-case as delivered upstream
    pub symbol: String,
    /// Current price in the quote currency
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub current_price: Option<Decimal>,
    /// Market capitalization
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub market_cap: Option<Decimal>,
    /// Rank by market capitalization
    pub market_cap_rank: Option<u32>,
    /// Fully-diluted valuation
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub fully_diluted_valuation: Option<Decimal>,
    /// Price change over the last hour, in percent
    #[serde(rename = "price_change_percentage_1h_in_currency")]
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub change_1h: Option<Decimal>,
    /// Price change over the last 24 hours, in percent
    #[serde(rename = "price_change_percentage_24h_in_currency")]
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub change_24h: Option<Decimal>,
    /// Price change over the last 7 days, in percent
    #[serde(rename = "price_change_percentage_7d_in_currency")]
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub change_7d: Option<Decimal>,
}

/// Decode an optional JSON number, mapping unrepresentable values to `None`
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(number.and_then(|n| {
        if let Some(i) = n.as_i64() {
            return Some(Decimal::from(i));
        }
        if let Some(u) = n.as_u64() {
            return Some(Decimal::from(u));
        }
        n.as_f64()
            .and_then(|f| Decimal::from_str(&f.to_string()).ok())
    }))
}

impl AssetSnapshot {
    /// Percentage change for the given window
    pub fn change(&self, window: ChangeWindow) -> Option<Decimal> {
        match window {
            ChangeWindow::Hour => self.change_1h,
            ChangeWindow::Day => self.change_24h,
            ChangeWindow::Week => self.change_7d,
        }
    }
}

/// Percentage-change window an asset can be ranked on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeWindow {
    /// 1 hour
    Hour,
    /// 24 hours
    Day,
    /// 7 days
    Week,
}

impl ChangeWindow {
    /// All windows, shortest first
    pub const ALL: [ChangeWindow; 3] = [ChangeWindow::Hour, ChangeWindow::Day, ChangeWindow::Week];

    /// Token used in the upstream `price_change_percentage` parameter
    pub fn api_token(self) -> &'static str {
        match self {
            ChangeWindow::Hour => "1h",
            ChangeWindow::Day => "24h",
            ChangeWindow::Week => "7d",
        }
    }

    /// Label shown in table titles
    pub fn label(self) -> &'static str {
        match self {
            ChangeWindow::Hour => "1H",
            ChangeWindow::Day => "24H",
            ChangeWindow::Week => "7D",
        }
    }
}

impl fmt::Display for ChangeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_token())
    }
}

/// Errors raised while fetching market pages
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// Transport-level failure (connect, timeout, body read)
    #[error("Request for page {page} failed: {source}")]
    Http {
        page: u32,
        #[source]
        source: reqwest::Error,
    },
    /// Upstream answered with a non-success status
    #[error("Upstream returned {status} for page {page}: {body}")]
    Status {
        page: u32,
        status: reqwest::StatusCode,
        body: String,
    },
    /// Response body was not a JSON array of market records
    #[error("Failed to decode page {page}: {source}")]
    Decode {
        page: u32,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Page the error occurred on, if it is tied to one
    pub fn page(&self) -> Option<u32> {
        match self {
            FetchError::Client(_) => None,
            FetchError::Http { page, .. }
            | FetchError::Status { page, .. }
            | FetchError::Decode { page, .. } => Some(*page),
        }
    }
}
