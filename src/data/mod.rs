//! Data fetching and storage
//!
//! Handles:
//! - CBOE delayed quotes API for option chains (free)
//! - Saved chain files for offline runs
//! - Local caching with a one-day freshness window

pub mod cache;
pub mod cboe;
pub mod feed;

pub use cache::*;
pub use cboe::*;
pub use feed::*;
