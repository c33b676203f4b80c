//! Vendor option quote rows
//!
//! One row of the CBOE delayed-quotes option chain, as delivered. Only the
//! symbol, gamma and open interest feed the analysis; the remaining market
//! fields are carried so cached snapshots keep them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw option contract record from the feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawContract {
    /// Vendor option symbol
    pub option: String,
    /// Per-contract gamma
    #[serde(default)]
    pub gamma: Option<f64>,
    /// Open interest (sent as a JSON number, usually with `.0`)
    #[serde(default)]
    pub open_interest: Option<f64>,
    #[serde(default)]
    pub iv: Option<f64>,
    #[serde(default)]
    pub delta: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub bid: Option<f64>,
    #[serde(default)]
    pub ask: Option<f64>,
    #[serde(default)]
    pub last_trade_price: Option<f64>,
}

impl RawContract {
    /// Record with only the fields the analysis needs
    pub fn new(option: impl Into<String>, gamma: f64, open_interest: f64) -> Self {
        Self {
            option: option.into(),
            gamma: Some(gamma),
            open_interest: Some(open_interest),
            ..Default::default()
        }
    }
}

/// Point-in-time option chain for one ticker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSnapshot {
    /// Ticker symbol (e.g., "SPY")
    pub ticker: String,
    /// Underlying spot price
    pub spot: f64,
    /// All option rows
    pub contracts: Vec<RawContract>,
    /// When the snapshot was retrieved
    pub timestamp: DateTime<Utc>,
}

impl FeedSnapshot {
    pub fn new(ticker: impl Into<String>, spot: f64, contracts: Vec<RawContract>) -> Self {
        Self {
            ticker: ticker.into(),
            spot,
            contracts,
            timestamp: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}
