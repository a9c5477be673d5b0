//! Wire types for the curated events/markets API, the price-history API and
//! the data912 quote feeds.
//!
//! # Design notes
//! 1. Prices and volumes arrive as decimal strings on markets; they are kept
//!    as strings and parsed on demand so a bad field degrades one card, not
//!    the whole payload.
//! 2. `outcomes` / `outcomePrices` / `clobTokenIds` reach us in two (and a
//!    half) encodings: a JSON array serialized into a string, a plain
//!    comma-separated string, or occasionally a native array. One
//!    deserializer normalizes all of them; nothing else in the crate is
//!    allowed to re-implement that heuristic.
//! 3. Index `i` of `outcomes` corresponds to index `i` of `outcome_prices`
//!    and of `clob_token_ids`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Flexible array-in-a-string fields
// ============================================================================

/// Deserialize a field that may be a stringified JSON array, a
/// comma-separated string, or a native array, into `Vec<String>`.
///
/// Fallback order is fixed: structured decode first, then comma split, then
/// empty. Missing and `null` both yield an empty vector, and so does any
/// other shape the field cannot carry labels in (an object, a bare number,
/// a bool): unusable content degrades the field, never the containing
/// market. Numeric elements of a decoded array are kept as their literal
/// text (`0.72` -> `"0.72"`).
fn flexible_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{IgnoredAny, MapAccess, SeqAccess, Visitor};

    struct FlexibleListVisitor;

    fn value_to_string(v: Value) -> Option<String> {
        match v {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    impl<'de> Visitor<'de> for FlexibleListVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a stringified JSON array, a comma-separated string, or an array")
        }

        fn visit_str<E: serde::de::Error>(self, s: &str) -> Result<Self::Value, E> {
            if s.trim().is_empty() {
                return Ok(Vec::new());
            }
            match serde_json::from_str::<Vec<Value>>(s) {
                Ok(values) => Ok(values.into_iter().filter_map(value_to_string).collect()),
                // Not a JSON array: treat as "Sí,No"-style plain text.
                Err(_) => Ok(s.split(',').map(|part| part.trim().to_string()).collect()),
            }
        }

        fn visit_string<E: serde::de::Error>(self, s: String) -> Result<Self::Value, E> {
            self.visit_str(&s)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut out = Vec::new();
            while let Some(value) = seq.next_element::<Value>()? {
                if let Some(s) = value_to_string(value) {
                    out.push(s);
                }
            }
            Ok(out)
        }

        // Objects, bare numbers and bools cannot carry outcome labels.
        // The map must still be drained so the deserializer stays
        // positioned past it.
        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(Vec::new())
        }

        fn visit_bool<E: serde::de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_i64<E: serde::de::Error>(self, _: i64) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_u64<E: serde::de::Error>(self, _: u64) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_f64<E: serde::de::Error>(self, _: f64) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(FlexibleListVisitor)
}

// ============================================================================
// Curated API types
// ============================================================================

/// A single prediction market as served by the curated API.
///
/// Outcome labels, outcome prices and CLOB token ids are parallel sequences;
/// a market with no usable outcome data simply has empty vectors here.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    /// Unique market identifier.
    pub id: String,

    /// Market question/title.
    pub question: String,

    /// URL-friendly market name.
    pub slug: String,

    /// Market description.
    #[serde(default)]
    pub description: String,

    /// Market open time (ISO 8601).
    #[serde(default)]
    pub start_date: String,

    /// Market close time (ISO 8601).
    #[serde(default)]
    pub end_date: String,

    /// Close time duplicated by upstream in strict ISO form.
    #[serde(default)]
    pub end_date_iso: String,

    /// Card image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Small icon URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Outcome labels (e.g. `["Sí", "No"]`).
    #[serde(default, deserialize_with = "flexible_string_list")]
    pub outcomes: Vec<String>,

    /// Implied-probability prices as decimal strings in [0, 1], one per
    /// outcome.
    #[serde(default, deserialize_with = "flexible_string_list")]
    pub outcome_prices: Vec<String>,

    /// Opaque token ids used to request each outcome's price history.
    #[serde(default, deserialize_with = "flexible_string_list")]
    pub clob_token_ids: Vec<String>,

    /// Traded volume as a decimal string.
    #[serde(default)]
    pub volume: String,

    /// Whether the market is currently active.
    #[serde(default)]
    pub active: bool,

    /// Whether the market has closed.
    #[serde(default)]
    pub closed: bool,

    /// Sub-title within a grouped event (e.g. a candidate name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_item_title: Option<String>,

    /// Threshold within a grouped event, as text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_item_threshold: Option<String>,

    /// Minimum price tick on the order book, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_price_min_tick_size: Option<f64>,
}

impl Market {
    /// Traded volume as a number. Unparseable volume counts as zero so
    /// ranking by volume stays total.
    pub fn volume_num(&self) -> f64 {
        self.volume.parse::<f64>().unwrap_or(0.0)
    }

    /// Open time as a Unix timestamp (seconds), when parseable.
    pub fn start_timestamp(&self) -> Option<i64> {
        parse_rfc3339(&self.start_date)
    }

    /// Close time as a Unix timestamp (seconds), when parseable.
    pub fn end_timestamp(&self) -> Option<i64> {
        parse_rfc3339(&self.end_date)
    }

    /// Outcome label / price-string pairs, in upstream order.
    pub fn outcome_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes
            .iter()
            .zip(self.outcome_prices.iter())
            .map(|(label, price)| (label.as_str(), price.as_str()))
    }

    /// Price of outcome `index` parsed from its decimal string.
    pub fn price_at(&self, index: usize) -> Option<f64> {
        self.outcome_prices.get(index).and_then(|p| p.parse::<f64>().ok())
    }

    /// CLOB token id of outcome `index`, when present and non-empty.
    pub fn token_id_at(&self, index: usize) -> Option<&str> {
        self.clob_token_ids.get(index).map(String::as_str).filter(|id| !id.is_empty())
    }

    /// Active and not yet closed ("Activo" badge).
    pub fn is_live(&self) -> bool {
        self.active && !self.closed
    }
}

/// A curated event: a themed group of one or more markets.
///
/// The event volume is reported by upstream independently of the member
/// markets' volumes; it is not their sum.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique event identifier.
    pub id: String,

    /// Short upstream ticker for the event.
    #[serde(default)]
    pub ticker: String,

    /// URL-friendly event name.
    pub slug: String,

    /// Event title.
    pub title: String,

    /// Event description (possibly multi-line).
    #[serde(default)]
    pub description: String,

    /// Event open time (ISO 8601).
    #[serde(default)]
    pub start_date: String,

    /// Event close time (ISO 8601).
    #[serde(default)]
    pub end_date: String,

    /// Banner image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Small icon URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Whether the event is currently active.
    #[serde(default)]
    pub active: bool,

    /// Whether the event has closed.
    #[serde(default)]
    pub closed: bool,

    /// Aggregate event volume (a plain JSON number upstream).
    #[serde(default)]
    pub volume: f64,

    /// Member markets, in upstream order.
    #[serde(default)]
    pub markets: Vec<Market>,
}

impl Event {
    /// Open time as a Unix timestamp (seconds), when parseable.
    pub fn start_timestamp(&self) -> Option<i64> {
        parse_rfc3339(&self.start_date)
    }

    /// Close time as a Unix timestamp (seconds), when parseable.
    pub fn end_timestamp(&self) -> Option<i64> {
        parse_rfc3339(&self.end_date)
    }

    /// Active and not yet closed.
    pub fn is_live(&self) -> bool {
        self.active && !self.closed
    }
}

fn parse_rfc3339(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.timestamp())
}

/// `GET {base}/events` envelope.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventsResponse {
    #[serde(default)]
    pub events: Vec<Event>,
}

/// `GET {base}/markets` envelope.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarketsResponse {
    #[serde(default)]
    pub markets: Vec<Market>,
}

// ============================================================================
// Price-history types
// ============================================================================

/// One sample of an outcome's price history.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    /// Unix timestamp (seconds).
    pub t: i64,
    /// Implied probability in [0, 1].
    pub p: f64,
}

/// `GET {priceBase}/prices-history` envelope.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PriceHistoryResponse {
    #[serde(default)]
    pub history: Vec<PricePoint>,
}

/// A fetched price history tagged with the market it belongs to, so series
/// stay associated with their source regardless of arrival order.
#[derive(Clone, Debug)]
pub struct MarketSeries {
    /// Question of the market the series belongs to.
    pub label: String,
    /// Time-ordered samples for that market's yes-outcome.
    pub points: Vec<PricePoint>,
}

// ============================================================================
// Quote types (data912 ADR / bond feeds)
// ============================================================================

/// A live quote from the data912 feeds. ADRs and sovereign bonds share the
/// same shape. Each poll fully replaces prior state; nothing is retained.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
    /// Ticker symbol (e.g. `GGAL`, `AL30D`).
    pub symbol: String,

    /// Bid size.
    #[serde(default)]
    pub q_bid: f64,

    /// Bid price.
    #[serde(default)]
    pub px_bid: f64,

    /// Ask price.
    #[serde(default)]
    pub px_ask: f64,

    /// Ask size.
    #[serde(default)]
    pub q_ask: f64,

    /// Traded volume.
    #[serde(default)]
    pub v: f64,

    /// Number of operations.
    #[serde(default)]
    pub q_op: f64,

    /// Last/closing price.
    #[serde(default)]
    pub c: f64,

    /// Percent change on the day.
    #[serde(default)]
    pub pct_change: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market_from(json: serde_json::Value) -> Market {
        serde_json::from_value(json).expect("market should deserialize")
    }

    #[test]
    fn outcomes_decode_from_stringified_array() {
        let market = market_from(serde_json::json!({
            "id": "1",
            "question": "¿Habrá balotaje?",
            "slug": "habra-balotaje",
            "outcomes": "[\"Sí\",\"No\"]",
            "outcomePrices": "[\"0.62\",\"0.38\"]",
        }));
        assert_eq!(market.outcomes, vec!["Sí", "No"]);
        assert_eq!(market.outcome_prices, vec!["0.62", "0.38"]);
    }

    #[test]
    fn outcomes_decode_from_comma_separated_string() {
        let market = market_from(serde_json::json!({
            "id": "1",
            "question": "q",
            "slug": "s",
            "outcomes": "Sí, No",
        }));
        assert_eq!(market.outcomes, vec!["Sí", "No"]);
    }

    #[test]
    fn outcomes_decode_from_native_array_with_numbers() {
        let market = market_from(serde_json::json!({
            "id": "1",
            "question": "q",
            "slug": "s",
            "outcomes": ["Sí", "No"],
            "outcomePrices": [0.7, 0.3],
        }));
        assert_eq!(market.outcomes, vec!["Sí", "No"]);
        assert_eq!(market.outcome_prices, vec!["0.7", "0.3"]);
    }

    #[test]
    fn missing_null_and_empty_fields_yield_empty_lists() {
        for outcomes in [serde_json::json!(null), serde_json::json!("")] {
            let market = market_from(serde_json::json!({
                "id": "1",
                "question": "q",
                "slug": "s",
                "outcomes": outcomes,
            }));
            assert!(market.outcomes.is_empty());
        }
        let market = market_from(serde_json::json!({
            "id": "1",
            "question": "q",
            "slug": "s",
        }));
        assert!(market.outcomes.is_empty());
        assert!(market.clob_token_ids.is_empty());
    }

    #[test]
    fn non_string_non_array_fields_degrade_to_empty() {
        for garbage in [
            serde_json::json!({"si": 0.62, "no": 0.38}),
            serde_json::json!(42),
            serde_json::json!(-7),
            serde_json::json!(2.5),
            serde_json::json!(true),
        ] {
            let market = market_from(serde_json::json!({
                "id": "1",
                "question": "q",
                "slug": "s",
                "outcomes": garbage.clone(),
                "outcomePrices": garbage,
            }));
            assert!(market.outcomes.is_empty());
            assert!(market.outcome_prices.is_empty());
        }

        // Same degradation on the streaming path, not just via from_value.
        let market: Market = serde_json::from_str(
            r#"{"id":"1","question":"q","slug":"s","outcomes":{"si":0.6},"clobTokenIds":false}"#,
        )
        .expect("market with unusable dynamic fields should still deserialize");
        assert!(market.outcomes.is_empty());
        assert!(market.clob_token_ids.is_empty());
    }

    #[test]
    fn stringified_prices_with_numeric_elements_decode() {
        let market = market_from(serde_json::json!({
            "id": "1",
            "question": "q",
            "slug": "s",
            "outcomePrices": "[0.65, 0.35]",
        }));
        assert_eq!(market.outcome_prices, vec!["0.65", "0.35"]);
        assert_eq!(market.price_at(0), Some(0.65));
    }

    #[test]
    fn volume_parses_with_zero_fallback() {
        let mut market = market_from(serde_json::json!({
            "id": "1",
            "question": "q",
            "slug": "s",
            "volume": "125000.5",
        }));
        assert_eq!(market.volume_num(), 125000.5);
        market.volume = "not-a-number".to_string();
        assert_eq!(market.volume_num(), 0.0);
    }

    #[test]
    fn lifecycle_timestamps_parse_rfc3339() {
        let market = market_from(serde_json::json!({
            "id": "1",
            "question": "q",
            "slug": "s",
            "endDate": "2026-10-25T12:00:00Z",
        }));
        assert_eq!(market.end_timestamp(), Some(1792929600));
        assert_eq!(market.start_timestamp(), None);
    }

    #[test]
    fn event_carries_independent_volume_and_markets() {
        let event: Event = serde_json::from_value(serde_json::json!({
            "id": "e1",
            "slug": "elecciones",
            "title": "Elecciones 2027",
            "startDate": "2026-08-01T00:00:00Z",
            "endDate": "2026-10-25T12:00:00Z",
            "volume": 1250000.0,
            "active": true,
            "closed": false,
            "markets": [
                { "id": "m1", "question": "q1", "slug": "s1", "volume": "10" }
            ]
        }))
        .expect("event should deserialize");
        assert_eq!(event.volume, 1250000.0);
        assert_eq!(event.markets.len(), 1);
        assert!(event.is_live());
        assert_eq!(event.start_timestamp(), Some(1785542400));
        assert_eq!(event.end_timestamp(), Some(1792929600));
    }

    #[test]
    fn quote_tolerates_missing_numeric_fields() {
        let quote: Quote = serde_json::from_value(serde_json::json!({
            "symbol": "GGAL",
            "c": 58.3,
            "pct_change": 2.41,
        }))
        .expect("quote should deserialize");
        assert_eq!(quote.symbol, "GGAL");
        assert_eq!(quote.c, 58.3);
        assert_eq!(quote.px_bid, 0.0);
    }

    #[test]
    fn token_id_lookup_skips_empty_entries() {
        let market = market_from(serde_json::json!({
            "id": "1",
            "question": "q",
            "slug": "s",
            "clobTokenIds": "[\"\",\"tok-no\"]",
        }));
        assert_eq!(market.token_id_at(0), None);
        assert_eq!(market.token_id_at(1), Some("tok-no"));
        assert_eq!(market.token_id_at(2), None);
    }
}
