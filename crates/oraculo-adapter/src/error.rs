//! Error type shared by the feed clients.
//!
//! Every upstream surface here is a plain GET returning JSON, so one enum
//! covers all of them. What differs between call sites is the handling
//! policy, not the error shape:
//! - curated events/markets: errors propagate (page-fatal),
//! - per-outcome history: errors are caught per series and the series is
//!   dropped,
//! - quote boards: errors blank the ticker for that cycle.

use thiserror::Error;

/// Errors produced by the curated, price-history and quote clients.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Transport-level failure (connect, timeout, body read) or a response
    /// body that did not decode as the expected JSON shape.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("HTTP {status} for {url}")]
    Status {
        /// Status code returned by the server.
        status: reqwest::StatusCode,
        /// Full request URL, for log lines.
        url: String,
    },
}

/// Result alias used throughout the adapter.
pub type Result<T, E = FeedError> = std::result::Result<T, E>;
