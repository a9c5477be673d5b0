//! Price-history REST client
//!
//! Base URL: https://clob.polymarket.com
//!
//! # Endpoints
//! - GET /prices-history?market={tokenId}&interval={token}&fidelity={minutes}

use futures::future::join_all;
use reqwest::Client;
use tracing::{debug, warn};

use crate::curated::headline;
use crate::error::{FeedError, Result};
use crate::types::{Market, MarketSeries, PriceHistoryResponse, PricePoint};
use crate::CLOB_API_BASE;

/// History window requested from the pricing API. `1m` is one month, not
/// one minute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interval {
    OneHour,
    SixHours,
    OneDay,
    /// The default chart view.
    #[default]
    OneWeek,
    OneMonth,
    Max,
}

impl Interval {
    /// Wire token for the `interval` query parameter.
    pub fn as_token(&self) -> &'static str {
        match self {
            Interval::OneHour => "1h",
            Interval::SixHours => "6h",
            Interval::OneDay => "1d",
            Interval::OneWeek => "1w",
            Interval::OneMonth => "1m",
            Interval::Max => "max",
        }
    }

    /// Sampling granularity in minutes used when the caller does not
    /// override it. Wider windows sample coarser.
    pub fn default_fidelity(&self) -> u32 {
        match self {
            Interval::OneHour => 1,
            Interval::SixHours => 5,
            Interval::OneDay => 15,
            Interval::OneWeek => 60,
            Interval::OneMonth => 180,
            Interval::Max => 720,
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}

impl std::str::FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(' ', "").as_str() {
            "1h" | "1hour" | "hour" => Ok(Interval::OneHour),
            "6h" | "6hours" => Ok(Interval::SixHours),
            "1d" | "1day" | "day" => Ok(Interval::OneDay),
            "1w" | "1week" | "week" => Ok(Interval::OneWeek),
            "1m" | "1month" | "month" => Ok(Interval::OneMonth),
            "max" | "all" => Ok(Interval::Max),
            _ => Err(format!("unknown interval {s:?} (use 1h, 6h, 1d, 1w, 1m or max)")),
        }
    }
}

/// Price-history REST client
#[derive(Clone)]
pub struct HistoryClient {
    client: Client,
    base_url: String,
}

impl HistoryClient {
    /// Create a new history client with the default base URL
    pub fn new() -> Result<Self> {
        Self::with_base_url(CLOB_API_BASE)
    }

    /// Create a new history client with a custom base URL
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = Client::builder().timeout(std::time::Duration::from_secs(30)).build()?;

        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// GET /prices-history - one outcome's time-ordered series.
    /// `fidelity` falls back to the interval's default granularity.
    pub async fn get_history(
        &self,
        token_id: &str,
        interval: Interval,
        fidelity: Option<u32>,
    ) -> Result<Vec<PricePoint>> {
        let fidelity = fidelity.unwrap_or_else(|| interval.default_fidelity());
        let url = format!(
            "{}/prices-history?market={}&interval={}&fidelity={}",
            self.base_url,
            token_id,
            interval.as_token(),
            fidelity
        );
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("HTTP {} body: {}", status, body);
            return Err(FeedError::Status { status, url });
        }

        let payload: PriceHistoryResponse = response.json().await?;
        Ok(payload.history)
    }

    /// Fetch the yes-outcome history of every market that has one, all
    /// fetches in flight concurrently.
    ///
    /// A market participates when a yes-labeled outcome exists and a token
    /// id is present at the same index. Failures and empty histories are
    /// logged and dropped per series; siblings are never aborted, and the
    /// call itself cannot fail. Each surviving series is tagged with its
    /// market's question, so association does not depend on arrival order.
    pub async fn yes_histories(
        &self,
        markets: &[Market],
        interval: Interval,
        fidelity: Option<u32>,
    ) -> Vec<MarketSeries> {
        let targets: Vec<(&Market, &str)> = markets
            .iter()
            .filter_map(|market| {
                let index = headline::yes_index(market)?;
                let token = market.token_id_at(index)?;
                Some((market, token))
            })
            .collect();

        let fetches = targets.into_iter().map(|(market, token)| async move {
            match self.get_history(token, interval, fidelity).await {
                Ok(points) if points.is_empty() => {
                    warn!("empty history for {:?}, dropping series", market.question);
                    None
                }
                Ok(points) => Some(MarketSeries { label: market.question.clone(), points }),
                Err(err) => {
                    warn!("history fetch failed for {:?}: {}, dropping series", market.question, err);
                    None
                }
            }
        });

        join_all(fetches).await.into_iter().flatten().collect()
    }
}
