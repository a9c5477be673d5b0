//! Outcome price-history feed
//!
//! # Components
//! - `HistoryClient`: REST client for per-outcome price series
//! - `Interval`: requested history window with per-window default fidelity

mod history;

pub use history::{HistoryClient, Interval};
