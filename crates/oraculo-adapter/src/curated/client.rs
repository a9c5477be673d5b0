//! Curated feed REST client
//!
//! Base URL: https://api.oraculo.ar/api/curated
//!
//! # Endpoints
//! - GET /events - Curated events with their member markets
//! - GET /markets - Curated standalone markets

use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::error::{FeedError, Result};
use crate::types::{Event, EventsResponse, Market, MarketsResponse};
use crate::CURATED_API_BASE;

/// Curated feed REST client
#[derive(Clone)]
pub struct CuratedClient {
    client: Client,
    base_url: String,
}

impl CuratedClient {
    /// Create a new curated client with the default base URL
    pub fn new() -> Result<Self> {
        Self::with_base_url(CURATED_API_BASE)
    }

    /// Create a new curated client with a custom base URL
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = Client::builder().timeout(std::time::Duration::from_secs(30)).build()?;

        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// GET /events - The curated event list, member markets included.
    /// Any failure here is page-fatal for the caller.
    pub async fn get_events(&self) -> Result<Vec<Event>> {
        let url = format!("{}/events", self.base_url);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("HTTP {} body: {}", status, body);
            return Err(FeedError::Status { status, url });
        }

        let payload: EventsResponse = response.json().await?;
        Ok(payload.events)
    }

    /// GET /markets - Curated markets not attached to any event.
    pub async fn get_markets(&self) -> Result<Vec<Market>> {
        let url = format!("{}/markets", self.base_url);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("HTTP {} body: {}", status, body);
            return Err(FeedError::Status { status, url });
        }

        let payload: MarketsResponse = response.json().await?;
        Ok(payload.markets)
    }

    /// Fetch events and standalone markets concurrently, awaited jointly.
    /// One failure fails the whole page; there is no partial front page.
    pub async fn front_page(&self) -> Result<FrontPage> {
        let (events, markets) = tokio::try_join!(self.get_events(), self.get_markets())?;
        Ok(FrontPage { events, markets })
    }
}

/// Everything the front page renders in one pass.
#[derive(Clone, Debug, Serialize)]
pub struct FrontPage {
    pub events: Vec<Event>,
    /// Curated markets outside any event.
    pub markets: Vec<Market>,
}

impl FrontPage {
    /// Hero stat: standalone markets plus every event's member markets.
    pub fn total_markets(&self) -> usize {
        self.markets.len() + self.events.iter().map(|e| e.markets.len()).sum::<usize>()
    }

    /// Hero stat: combined volume of the standalone markets.
    pub fn standalone_volume(&self) -> f64 {
        self.markets.iter().map(Market::volume_num).sum()
    }
}
