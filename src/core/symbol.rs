//! Vendor option symbol decoding
//!
//! CBOE delayed-quote symbols look like `SPY241220C00450000`:
//! root, `YYMMDD` expiry, `C`/`P`, then the strike times 1000 in eight digits.
//! Strikes are kept in whole dollars; the three fractional digits are dropped.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use super::error::DecodeError;
use super::option::OptionType;

/// Digit, type letter, digit
const TYPE_PATTERN: &str = r"\d([A-Z])\d";
/// Strike digits after the type letter, excluding the 3-digit fraction
const STRIKE_PATTERN: &str = r"\d[A-Z](\d+)\d{3}";
/// Digit run right after the first letter of the root
const EXPIRY_PATTERN: &str = r"[A-Z](\d+)";

/// Fields recovered from an option symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedSymbol {
    pub option_type: OptionType,
    pub strike: u32,
    pub expiration: NaiveDate,
}

/// Compiled symbol patterns
#[derive(Debug, Clone)]
pub struct SymbolDecoder {
    type_re: Regex,
    strike_re: Regex,
    expiry_re: Regex,
}

impl SymbolDecoder {
    pub fn new() -> Self {
        Self {
            type_re: Regex::new(TYPE_PATTERN).expect("type pattern is valid"),
            strike_re: Regex::new(STRIKE_PATTERN).expect("strike pattern is valid"),
            expiry_re: Regex::new(EXPIRY_PATTERN).expect("expiry pattern is valid"),
        }
    }

    /// Decode all three fields; any mismatch is an error
    pub fn decode(&self, symbol: &str) -> Result<DecodedSymbol, DecodeError> {
        Ok(DecodedSymbol {
            option_type: self.option_type(symbol)?,
            strike: self.strike(symbol)?,
            expiration: self.expiration(symbol)?,
        })
    }

    pub fn option_type(&self, symbol: &str) -> Result<OptionType, DecodeError> {
        let letter = self
            .type_re
            .captures(symbol)
            .and_then(|c| c.get(1))
            .ok_or_else(|| DecodeError::MissingOptionType(symbol.to_string()))?
            .as_str();

        letter
            .chars()
            .next()
            .and_then(OptionType::from_letter)
            .ok_or_else(|| DecodeError::UnknownOptionType {
                symbol: symbol.to_string(),
                letter: letter.to_string(),
            })
    }

    pub fn strike(&self, symbol: &str) -> Result<u32, DecodeError> {
        let digits = self
            .strike_re
            .captures(symbol)
            .and_then(|c| c.get(1))
            .ok_or_else(|| DecodeError::MissingStrike(symbol.to_string()))?
            .as_str();

        // Sub-dollar strikes truncate to 0 and are left for the strike band to drop
        digits.parse::<u32>().map_err(|_| DecodeError::InvalidStrike {
            symbol: symbol.to_string(),
            digits: digits.to_string(),
        })
    }

    pub fn expiration(&self, symbol: &str) -> Result<NaiveDate, DecodeError> {
        let digits = self
            .expiry_re
            .captures(symbol)
            .and_then(|c| c.get(1))
            .ok_or_else(|| DecodeError::MissingExpiration(symbol.to_string()))?
            .as_str();

        parse_yymmdd(digits).ok_or_else(|| DecodeError::InvalidExpiration {
            symbol: symbol.to_string(),
            digits: digits.to_string(),
        })
    }
}

impl Default for SymbolDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// `YYMMDD` with a 20xx century
fn parse_yymmdd(digits: &str) -> Option<NaiveDate> {
    if digits.len() != 6 {
        return None;
    }

    let yy: i32 = digits[0..2].parse().ok()?;
    let mm: u32 = digits[2..4].parse().ok()?;
    let dd: u32 = digits[4..6].parse().ok()?;

    NaiveDate::from_ymd_opt(2000 + yy, mm, dd)
}

/// Process-wide decoder
pub fn shared_decoder() -> &'static SymbolDecoder {
    static DECODER: OnceLock<SymbolDecoder> = OnceLock::new();
    DECODER.get_or_init(SymbolDecoder::new)
}

/// Decode with the shared decoder
pub fn decode_symbol(symbol: &str) -> Result<DecodedSymbol, DecodeError> {
    shared_decoder().decode(symbol)
}

/// Build a vendor symbol: root + YYMMDD + type + strike*1000 (8 digits)
pub fn format_symbol(
    root: &str,
    option_type: OptionType,
    strike: f64,
    expiration: NaiveDate,
) -> String {
    format!(
        "{}{:02}{:02}{:02}{}{:08}",
        root,
        expiration.year() % 100,
        expiration.month(),
        expiration.day(),
        option_type.letter(),
        (strike * 1000.0).round() as u64
    )
}
