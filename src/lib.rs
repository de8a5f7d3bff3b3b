//! crypto-movers: top crypto gainers and losers dashboard
//!
//! This library provides the core components for:
//! - Paginated market data retrieval from CoinGecko
//! - Ranking by 1h, 24h and 7d price change
//! - HTML dashboard rendering
//! - A single-route dashboard HTTP server
//! - Configuration and observability

pub mod cli;
pub mod config;
pub mod market;
pub mod ranking;
pub mod render;
pub mod server;
pub mod telemetry;
