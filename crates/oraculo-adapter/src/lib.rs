//! Oráculo feed adapter
//!
//! Typed clients and display logic for an Argentine prediction-market
//! viewer:
//! - `curated`: curated events/markets feed + primary-outcome selection
//! - `clob`: per-outcome price-history client
//! - `spark`: multi-series sparkline normalization and SVG output
//! - `data912`: live ADR/bond quote boards with scoped 30s polling
//! - `format` / `links`: shared display formatting and outbound deep links
//!
//! All upstream surfaces are plain GET endpoints returning JSON; see the
//! module docs for the endpoint shapes.

pub mod clob;
pub mod curated;
pub mod data912;
pub mod error;
pub mod format;
pub mod links;
pub mod spark;
pub mod types;

pub use error::{FeedError, Result};
pub use types::*;

/// Curated feed base URL (events + standalone markets)
pub const CURATED_API_BASE: &str = "https://api.oraculo.ar/api/curated";

/// Price-history API base URL
pub const CLOB_API_BASE: &str = "https://clob.polymarket.com";

/// Live quote feed base URL (ADRs + sovereign bonds)
pub const DATA912_API_BASE: &str = "https://data912.com";

/// Marketplace base URL for outbound deep links
pub const TRADE_BASE: &str = "https://polymarket.com";

/// Fixed refresh period for quote boards; no backoff, no jitter.
pub const QUOTE_REFRESH_INTERVAL: std::time::Duration = std::time::Duration::from_secs(30);
