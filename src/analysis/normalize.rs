//! Contract normalization
//!
//! Turns vendor rows into typed contracts. A batch either normalizes
//! completely or fails on its first bad record.

use crate::core::{
    shared_decoder, DecodedContract, NormalizationError, RawContract, SymbolDecoder,
};

/// Normalize a batch with the shared decoder
pub fn normalize_contracts(raw: &[RawContract]) -> Result<Vec<DecodedContract>, NormalizationError> {
    normalize_with(shared_decoder(), raw)
}

/// Normalize a batch, preserving input order
pub fn normalize_with(
    decoder: &SymbolDecoder,
    raw: &[RawContract],
) -> Result<Vec<DecodedContract>, NormalizationError> {
    let contracts = raw
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_one(decoder, index, record))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("Normalized {} contracts", contracts.len());
    Ok(contracts)
}

fn normalize_one(
    decoder: &SymbolDecoder,
    index: usize,
    record: &RawContract,
) -> Result<DecodedContract, NormalizationError> {
    let symbol = &record.option;

    let decoded = decoder
        .decode(symbol)
        .map_err(|source| NormalizationError::Decode {
            index,
            symbol: symbol.clone(),
            source,
        })?;

    let gamma = required(index, symbol, "gamma", record.gamma)?;

    // Negative counts contribute no exposure
    let open_interest = required(index, symbol, "open_interest", record.open_interest)?.max(0.0);

    Ok(DecodedContract {
        symbol: symbol.clone(),
        option_type: decoded.option_type,
        strike: decoded.strike,
        expiration: decoded.expiration,
        gamma,
        open_interest: open_interest as u64,
    })
}

/// Present and finite
fn required(
    index: usize,
    symbol: &str,
    field: &'static str,
    value: Option<f64>,
) -> Result<f64, NormalizationError> {
    match value {
        None => Err(NormalizationError::MissingField {
            index,
            symbol: symbol.to_string(),
            field,
        }),
        Some(v) if !v.is_finite() => Err(NormalizationError::InvalidField {
            index,
            symbol: symbol.to_string(),
            field,
            value: v,
        }),
        Some(v) => Ok(v),
    }
}
