//! Live ADR and sovereign-bond quote boards
//!
//! # Components
//! - `Board`: board catalog (endpoint path, symbol whitelist, names)
//! - `Data912Client`: REST client for the live quote feeds
//! - `QuoteTicker`: owned 30-second polling task per board view

mod catalog;
mod client;
mod ticker;

pub use catalog::{Board, WHITELISTED_ADRS, WHITELISTED_BONDS};
pub use client::Data912Client;
pub use ticker::QuoteTicker;
