//! Error types for GEX analysis

use thiserror::Error;

/// Failure to decode a vendor option symbol into type, strike and expiration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("no option type letter in symbol {0:?}")]
    MissingOptionType(String),

    #[error("unknown option type {letter:?} in symbol {symbol:?}")]
    UnknownOptionType { symbol: String, letter: String },

    #[error("no strike digits in symbol {0:?}")]
    MissingStrike(String),

    #[error("invalid strike {digits:?} in symbol {symbol:?}")]
    InvalidStrike { symbol: String, digits: String },

    #[error("no expiration digits in symbol {0:?}")]
    MissingExpiration(String),

    #[error("invalid expiration {digits:?} in symbol {symbol:?} (expected YYMMDD)")]
    InvalidExpiration { symbol: String, digits: String },
}

/// Failure while normalizing a batch of raw contracts.
///
/// Always refers to the first offending record; the batch produces no output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizationError {
    #[error("record {index} ({symbol}): {source}")]
    Decode {
        index: usize,
        symbol: String,
        #[source]
        source: DecodeError,
    },

    #[error("record {index} ({symbol}): missing field `{field}`")]
    MissingField {
        index: usize,
        symbol: String,
        field: &'static str,
    },

    #[error("record {index} ({symbol}): invalid `{field}` value {value}")]
    InvalidField {
        index: usize,
        symbol: String,
        field: &'static str,
        value: f64,
    },
}

impl NormalizationError {
    /// Zero-based position of the failing record in the batch
    pub fn index(&self) -> usize {
        match self {
            Self::Decode { index, .. }
            | Self::MissingField { index, .. }
            | Self::InvalidField { index, .. } => *index,
        }
    }
}

#[derive(Error, Debug)]
pub enum GexError {
    #[error("Normalization error: {0}")]
    Normalization(#[from] NormalizationError),

    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

pub type GexResult<T> = Result<T, GexError>;

impl GexError {
    pub fn data_unavailable(msg: impl Into<String>) -> Self {
        Self::DataUnavailable(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// True for failures of the feed itself, as opposed to bad data inside it
    pub fn is_retrieval_failure(&self) -> bool {
        matches!(self, Self::DataUnavailable(_) | Self::Network(_))
    }
}

impl From<serde_json::Error> for GexError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
