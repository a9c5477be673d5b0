//! data912 live-quote REST client
//!
//! Base URL: https://data912.com
//!
//! # Endpoints
//! - GET /live/usa_adrs - Argentine ADR quotes
//! - GET /live/arg_bonds - Argentine sovereign bond quotes

use reqwest::Client;
use tracing::debug;

use crate::data912::Board;
use crate::error::{FeedError, Result};
use crate::types::Quote;
use crate::DATA912_API_BASE;

/// data912 live-quote REST client
#[derive(Clone)]
pub struct Data912Client {
    client: Client,
    base_url: String,
}

impl Data912Client {
    /// Create a new quote client with the default base URL
    pub fn new() -> Result<Self> {
        Self::with_base_url(DATA912_API_BASE)
    }

    /// Create a new quote client with a custom base URL
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = Client::builder().timeout(std::time::Duration::from_secs(30)).build()?;

        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// Fetch a board's quotes: whitelist-filtered and sorted by percent
    /// change, best performer first. The feed returns a bare array.
    pub async fn get_board(&self, board: Board) -> Result<Vec<Quote>> {
        let url = format!("{}{}", self.base_url, board.path());
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("HTTP {} body: {}", status, body);
            return Err(FeedError::Status { status, url });
        }

        let quotes: Vec<Quote> = response.json().await?;
        let mut quotes: Vec<Quote> = quotes
            .into_iter()
            .filter(|quote| board.whitelist().contains(&quote.symbol.as_str()))
            .collect();
        quotes.sort_by(|a, b| b.pct_change.total_cmp(&a.pct_change));
        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn quote(symbol: &str, pct_change: f64) -> serde_json::Value {
        serde_json::json!({
            "symbol": symbol,
            "q_bid": 100.0,
            "px_bid": 10.0,
            "px_ask": 10.2,
            "q_ask": 150.0,
            "v": 12000.0,
            "q_op": 40.0,
            "c": 10.1,
            "pct_change": pct_change,
        })
    }

    #[tokio::test]
    async fn board_is_whitelisted_and_sorted_by_pct_change() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/live/usa_adrs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                quote("GGAL", 1.2),
                quote("FAKE", 9.9),
                quote("YPF", 3.4),
            ])))
            .mount(&server)
            .await;

        let client = Data912Client::with_base_url(&server.uri()).unwrap();
        let quotes = client.get_board(Board::Adrs).await.unwrap();
        let symbols: Vec<&str> = quotes.iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["YPF", "GGAL"]);
    }

    #[tokio::test]
    async fn bond_board_hits_its_own_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/live/arg_bonds"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                quote("AL30D", -0.4),
                quote("GGAL", 2.0),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = Data912Client::with_base_url(&server.uri()).unwrap();
        let quotes = client.get_board(Board::Bonds).await.unwrap();
        // GGAL is not a bond; it is filtered out here.
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].symbol, "AL30D");
        assert_eq!(quotes[0].pct_change, -0.4);
    }

    #[tokio::test]
    async fn upstream_failure_is_an_error_not_a_panic() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/live/usa_adrs"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = Data912Client::with_base_url(&server.uri()).unwrap();
        let err = client.get_board(Board::Adrs).await.unwrap_err();
        match err {
            FeedError::Status { status, .. } => assert_eq!(status.as_u16(), 503),
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
