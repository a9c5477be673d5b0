//! Curated events/markets feed
//!
//! # Components
//! - `CuratedClient`: REST client for the curated feed (events + markets)
//! - `headline`: primary-outcome selection for collapsed event cards

mod client;
pub mod headline;

pub use client::{CuratedClient, FrontPage};
pub use headline::{select_primary, yes_index, yes_outcome, Headline, YesOutcome};
