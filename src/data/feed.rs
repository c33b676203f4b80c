//! Feed providers
//!
//! Anything that can produce a `(spot, contracts)` snapshot for a ticker.

use std::fs;
use std::path::PathBuf;

use crate::core::{FeedSnapshot, GexResult};

use super::cboe::parse_chain;

/// Source of option chain snapshots
pub trait FeedProvider {
    /// Fetch the current snapshot for `ticker`.
    ///
    /// Fails with `GexError::DataUnavailable` when the spot price or the
    /// contract list is missing.
    fn fetch(&self, ticker: &str) -> GexResult<FeedSnapshot>;
}

impl<P: FeedProvider + ?Sized> FeedProvider for Box<P> {
    fn fetch(&self, ticker: &str) -> GexResult<FeedSnapshot> {
        (**self).fetch(ticker)
    }
}

impl<P: FeedProvider + ?Sized> FeedProvider for &P {
    fn fetch(&self, ticker: &str) -> GexResult<FeedSnapshot> {
        (**self).fetch(ticker)
    }
}

/// Reads a saved CBOE delayed-quotes response from disk
#[derive(Debug, Clone)]
pub struct JsonFileFeed {
    path: PathBuf,
}

impl JsonFileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FeedProvider for JsonFileFeed {
    fn fetch(&self, ticker: &str) -> GexResult<FeedSnapshot> {
        let body = fs::read_to_string(&self.path)?;
        let snapshot = parse_chain(ticker, &body)?;

        tracing::info!(
            "Loaded {} contracts for {} from {:?}",
            snapshot.len(),
            ticker,
            self.path
        );
        Ok(snapshot)
    }
}
