//! CBOE delayed quotes fetcher
//!
//! Fetches the full option chain for a ticker from CBOE's public CDN.
//! Index products (SPX, NDX, VIX) live under an underscore-prefixed name,
//! so `_TICKER` is tried first and plain `TICKER` second.
//!
//! Note: data is delayed ~15 minutes and intended for personal use.

use std::time::Duration;

use serde::Deserialize;

use crate::core::{FeedSnapshot, GexError, GexResult, RawContract};

use super::feed::FeedProvider;

/// HTTP client settings
#[derive(Debug, Clone)]
pub struct CboeConfig {
    /// Base URL of the delayed quotes endpoint
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for CboeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://cdn.cboe.com/api/global/delayed_quotes/options".to_string(),
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
        }
    }
}

/// CBOE delayed quotes API client
pub struct CboeClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl CboeClient {
    pub fn new(config: CboeConfig) -> GexResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GexError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL for one spelling of the ticker
    fn chain_url(&self, name: &str) -> String {
        format!("{}/{}.json", self.base_url, name)
    }

    fn get_body(&self, url: &str) -> GexResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| GexError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GexError::network(format!("{} returned {}", url, status)));
        }

        response.text().map_err(|e| GexError::network(e.to_string()))
    }

    fn fetch_named(&self, ticker: &str, name: &str) -> GexResult<FeedSnapshot> {
        let body = self.get_body(&self.chain_url(name))?;
        parse_chain(ticker, &body)
    }

    /// Get the option chain snapshot for a ticker
    pub fn get_chain(&self, ticker: &str) -> GexResult<FeedSnapshot> {
        let ticker = ticker.to_uppercase();

        let snapshot = match self.fetch_named(&ticker, &format!("_{}", ticker)) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("Index chain for _{} unavailable ({}), trying {}", ticker, e, ticker);
                self.fetch_named(&ticker, &ticker)?
            }
        };

        tracing::info!(
            "Fetched {} contracts for {} (spot {})",
            snapshot.len(),
            ticker,
            snapshot.spot
        );
        Ok(snapshot)
    }
}

impl FeedProvider for CboeClient {
    fn fetch(&self, ticker: &str) -> GexResult<FeedSnapshot> {
        self.get_chain(ticker)
    }
}

/// Parse a CBOE delayed quotes body into a snapshot
pub fn parse_chain(ticker: &str, body: &str) -> GexResult<FeedSnapshot> {
    let response: CboeResponse = serde_json::from_str(body)
        .map_err(|e| GexError::serialization(format!("Failed to parse chain for {}: {}", ticker, e)))?;

    let data = response
        .data
        .ok_or_else(|| GexError::data_unavailable(format!("no data section for {}", ticker)))?;

    let spot = data
        .current_price
        .ok_or_else(|| GexError::data_unavailable(format!("no spot price for {}", ticker)))?;

    let options = data
        .options
        .ok_or_else(|| GexError::data_unavailable(format!("no option list for {}", ticker)))?;

    Ok(FeedSnapshot::new(ticker.to_uppercase(), spot, options))
}

// CBOE API response structures

#[derive(Debug, Deserialize)]
struct CboeResponse {
    data: Option<CboeChainData>,
}

#[derive(Debug, Deserialize)]
struct CboeChainData {
    current_price: Option<f64>,
    options: Option<Vec<RawContract>>,
}

/// Convenience function to fetch SPY options
pub fn fetch_spy_chain() -> GexResult<FeedSnapshot> {
    CboeClient::new(CboeConfig::default())?.get_chain("SPY")
}
