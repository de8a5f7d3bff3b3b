//! Dashboard HTTP server
//!
//! A single `GET /` route that fetches, ranks and renders on every request.
//! Requests share no mutable state and never coalesce upstream fetches.

use crate::config::Config;
use crate::market::{CoinGeckoClient, CoinGeckoConfig, FetchPlan, MarketSource, PageFetcher};
use crate::ranking::rank_all;
use crate::render::{render_dashboard, Dashboard};
use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Plain-text body returned when no market data could be fetched
pub const FETCH_FAILED_BODY: &str = "Failed to fetch market data.";

/// Read-only state shared by all requests
pub struct AppState {
    fetcher: PageFetcher,
    limit: usize,
}

pub type SharedAppState = Arc<AppState>;

impl AppState {
    /// Build state over an arbitrary market source
    pub fn new(source: Arc<dyn MarketSource>, plan: FetchPlan, limit: usize) -> Self {
        Self {
            fetcher: PageFetcher::new(source, plan),
            limit,
        }
    }

    /// Build state backed by the CoinGecko client described in `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = CoinGeckoClient::with_config(CoinGeckoConfig::from(&config.upstream))
            .context("Failed to create CoinGecko client")?;

        Ok(Self::new(
            Arc::new(client),
            FetchPlan::from(&config.upstream),
            config.ranking.limit,
        ))
    }

    /// Fetch, rank and render the dashboard
    ///
    /// Returns `None` when the fetch produced no assets.
    pub async fn build_dashboard(&self) -> Option<String> {
        let assets = self.fetcher.fetch_top_assets().await;
        if assets.is_empty() {
            return None;
        }

        let rankings = rank_all(&assets, self.limit);
        Some(render_dashboard(&Dashboard::new(rankings, Utc::now())))
    }
}

/// Router with the dashboard route and request tracing
pub fn router(state: SharedAppState) -> Router {
    Router::new()
        .route("/", get(dashboard_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn dashboard_handler(State(state): State<SharedAppState>) -> Response {
    match state.build_dashboard().await {
        Some(html) => Html(html).into_response(),
        None => {
            error!("Dashboard request failed: no market data");
            (StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED_BODY).into_response()
        }
    }
}

/// Bind `address` and serve until Ctrl-C
pub async fn start(address: String, state: SharedAppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!("Crypto movers dashboard running at http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
