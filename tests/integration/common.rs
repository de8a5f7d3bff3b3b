//! Shared fixtures: snapshot builders, in-memory sources and a stub upstream

use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use crypto_movers::market::{AssetSnapshot, FetchError, MarketSource};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Snapshot with the same value in every change window
pub fn asset(id: &str, rank: u32, change: Option<Decimal>) -> AssetSnapshot {
    AssetSnapshot {
        id: id.to_string(),
        name: format!("Coin {id}"),
        symbol: id.to_string(),
        current_price: Some(Decimal::new(12345, 2)),
        market_cap: Some(Decimal::from(1_000_000_000u64 / u64::from(rank))),
        market_cap_rank: Some(rank),
        fully_diluted_valuation: None,
        change_1h: change,
        change_24h: change,
        change_7d: change,
    }
}

/// Upstream JSON record as CoinGecko would send it
pub fn market_record(id: &str, rank: u32, change_24h: f64) -> Value {
    json!({
        "id": id,
        "symbol": id,
        "name": format!("Coin {id}"),
        "image": format!("https://example.invalid/{id}.png"),
        "current_price": 1.5,
        "market_cap": 2_000_000_000u64 / u64::from(rank),
        "market_cap_rank": rank,
        "fully_diluted_valuation": null,
        "total_volume": 1000,
        "price_change_percentage_1h_in_currency": change_24h / 10.0,
        "price_change_percentage_24h_in_currency": change_24h,
        "price_change_percentage_7d_in_currency": change_24h * 3.0
    })
}

/// In-memory source serving fixed pages, failing on one page number
pub struct PagedSource {
    pages: Vec<Vec<AssetSnapshot>>,
    fail_on: Option<u32>,
    pub requested: Mutex<Vec<u32>>,
}

impl PagedSource {
    pub fn new(pages: Vec<Vec<AssetSnapshot>>, fail_on: Option<u32>) -> Self {
        Self {
            pages,
            fail_on,
            requested: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MarketSource for PagedSource {
    async fn fetch_page(&self, page: u32) -> Result<Vec<AssetSnapshot>, FetchError> {
        self.requested.lock().unwrap().push(page);

        if self.fail_on == Some(page) {
            return Err(FetchError::Status {
                page,
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                body: "upstream unavailable".to_string(),
            });
        }
        Ok(self
            .pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_default())
    }
}

/// What the stub upstream answers for one page
#[derive(Clone)]
pub enum StubPage {
    Json(Value),
    Raw(StatusCode, String),
}

struct StubState {
    pages: Vec<StubPage>,
    queries: Mutex<Vec<HashMap<String, String>>>,
}

/// Local HTTP server impersonating `/coins/markets`
pub struct StubUpstream {
    pub base_url: String,
    state: Arc<StubState>,
}

impl StubUpstream {
    /// Query strings received so far, in arrival order
    pub fn queries(&self) -> Vec<HashMap<String, String>> {
        self.state.queries.lock().unwrap().clone()
    }
}

async fn markets(
    State(state): State<Arc<StubState>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let page: usize = query
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);
    state.queries.lock().unwrap().push(query);

    match state.pages.get(page - 1).cloned() {
        Some(StubPage::Json(body)) => axum::Json(body).into_response(),
        Some(StubPage::Raw(status, body)) => (status, body).into_response(),
        None => axum::Json(json!([])).into_response(),
    }
}

/// Start the stub on an ephemeral port
pub async fn spawn_upstream(pages: Vec<StubPage>) -> StubUpstream {
    let state = Arc::new(StubState {
        pages,
        queries: Mutex::new(Vec::new()),
    });
    let app = Router::new()
        .route("/api/v3/coins/markets", get(markets))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubUpstream {
        base_url: format!("http://{addr}/api/v3"),
        state,
    }
}
