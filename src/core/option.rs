//! Option contract definitions
//!
//! Decoded contracts and their per-contract gamma exposure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Parse the vendor type letter
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'C' => Some(OptionType::Call),
            'P' => Some(OptionType::Put),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            OptionType::Call => 'C',
            OptionType::Put => 'P',
        }
    }

    /// Signed exposure under the dealer positioning assumption:
    /// dealers are long calls and short puts in aggregate.
    pub fn dealer_sign(&self, raw_gex: f64) -> f64 {
        match self {
            OptionType::Call => raw_gex,
            OptionType::Put => -raw_gex,
        }
    }
}

/// A vendor contract with type, strike and expiry recovered from its symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedContract {
    /// Vendor symbol (e.g., "SPY241220C00450000")
    pub symbol: String,
    /// Option type (Call/Put)
    pub option_type: OptionType,
    /// Strike in whole dollars
    pub strike: u32,
    /// Expiration date
    pub expiration: NaiveDate,
    /// Per-contract gamma from the feed
    pub gamma: f64,
    /// Outstanding contracts
    pub open_interest: u64,
}

impl DecodedContract {
    /// Days from `from` until expiration (negative once expired)
    pub fn days_to_expiry(&self, from: NaiveDate) -> i64 {
        (self.expiration - from).num_days()
    }

    pub fn is_expired(&self, as_of: NaiveDate) -> bool {
        self.expiration < as_of
    }
}

/// Decoded contract with its signed dollar gamma exposure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractGex {
    pub contract: DecodedContract,
    /// Signed notional exposure in USD per 1% move
    pub gex: f64,
}

impl ContractGex {
    pub fn option_type(&self) -> OptionType {
        self.contract.option_type
    }

    pub fn strike(&self) -> u32 {
        self.contract.strike
    }

    pub fn expiration(&self) -> NaiveDate {
        self.contract.expiration
    }
}
