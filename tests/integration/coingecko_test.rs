//! CoinGecko client against a local stub upstream

use super::common::{market_record, spawn_upstream, StubPage};
use axum::http::StatusCode;
use crypto_movers::market::{
    CoinGeckoClient, CoinGeckoConfig, FetchError, FetchPlan, MarketSource, PageFetcher,
};
use rust_decimal_macros::dec;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn client(base_url: &str) -> CoinGeckoClient {
    CoinGeckoClient::with_config(CoinGeckoConfig {
        base_url: base_url.to_string(),
        timeout: Some(Duration::from_secs(5)),
        ..CoinGeckoConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_page_sends_expected_query() {
    let upstream = spawn_upstream(vec![StubPage::Json(json!([
        market_record("btc", 1, 2.5),
        market_record("eth", 2, -1.25),
    ]))])
    .await;

    let assets = client(&upstream.base_url).fetch_page(1).await.unwrap();
    assert_eq!(assets.len(), 2);
    assert_eq!(assets[0].id, "btc");
    assert_eq!(assets[0].market_cap_rank, Some(1));
    assert_eq!(assets[0].current_price, Some(dec!(1.5)));
    assert_eq!(assets[0].market_cap, Some(dec!(2000000000)));
    assert_eq!(assets[0].fully_diluted_valuation, None);
    assert_eq!(assets[1].change_24h, Some(dec!(-1.25)));

    let queries = upstream.queries();
    assert_eq!(queries.len(), 1);
    let query = &queries[0];
    assert_eq!(query["vs_currency"], "usd");
    assert_eq!(query["order"], "market_cap_desc");
    assert_eq!(query["per_page"], "250");
    assert_eq!(query["page"], "1");
    assert_eq!(query["price_change_percentage"], "1h,24h,7d");
}

#[tokio::test]
async fn test_non_success_status_is_error() {
    let upstream = spawn_upstream(vec![StubPage::Raw(
        StatusCode::TOO_MANY_REQUESTS,
        "Throttled".to_string(),
    )])
    .await;

    let err = client(&upstream.base_url).fetch_page(1).await.unwrap_err();
    match err {
        FetchError::Status { page, status, body } => {
            assert_eq!(page, 1);
            assert_eq!(status, reqwest::StatusCode::TOO_MANY_REQUESTS);
            assert_eq!(body, "Throttled");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let upstream = spawn_upstream(vec![StubPage::Json(json!({"error": "not an array"}))]).await;

    let err = client(&upstream.base_url).fetch_page(1).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { page: 1, .. }));
}

#[tokio::test]
async fn test_unreachable_upstream_is_http_error() {
    // Bind then drop to get a port with nothing listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}/api/v3"))
        .fetch_page(2)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Http { page: 2, .. }));
}

#[tokio::test]
async fn test_fetcher_walks_pages_through_client() {
    let upstream = spawn_upstream(vec![
        StubPage::Json(json!([market_record("btc", 1, 1.0), market_record("eth", 2, 2.0)])),
        StubPage::Json(json!([market_record("sol", 3, 3.0)])),
    ])
    .await;

    let fetcher = PageFetcher::new(
        Arc::new(client(&upstream.base_url)),
        FetchPlan {
            max_pages: 2,
            page_delay: Duration::from_millis(10),
        },
    );

    let assets = fetcher.fetch_top_assets().await;
    let ids: Vec<&str> = assets.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["btc", "eth", "sol"]);

    let pages: Vec<String> = upstream
        .queries()
        .iter()
        .map(|q| q["page"].clone())
        .collect();
    assert_eq!(pages, vec!["1", "2"]);
}

#[tokio::test]
async fn test_fetcher_third_page_failure_yields_nothing() {
    let upstream = spawn_upstream(vec![
        StubPage::Json(json!([market_record("btc", 1, 1.0)])),
        StubPage::Json(json!([market_record("eth", 2, 2.0)])),
        StubPage::Raw(StatusCode::INTERNAL_SERVER_ERROR, "oops".to_string()),
    ])
    .await;

    let fetcher = PageFetcher::new(
        Arc::new(client(&upstream.base_url)),
        FetchPlan {
            max_pages: 3,
            page_delay: Duration::ZERO,
        },
    );

    assert!(fetcher.fetch_top_assets().await.is_empty());
    assert_eq!(upstream.queries().len(), 3);
}
