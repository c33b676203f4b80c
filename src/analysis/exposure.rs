//! Dealer gamma exposure per contract
//!
//! GEX = S · Γ · OI · M · S · 0.01, i.e. the dollar delta change for a 1% move
//! in spot, signed positive for calls and negative for puts.

use crate::core::{ContractGex, DecodedContract, GexError, GexResult, OptionType};

/// Unsigned dollar gamma for one contract line
pub fn raw_gex(spot: f64, gamma: f64, open_interest: u64, multiplier: f64) -> f64 {
    spot * gamma * open_interest as f64 * multiplier * spot * 0.01
}

/// Signed exposure for one contract
pub fn contract_gex(contract: &DecodedContract, spot: f64, multiplier: f64) -> f64 {
    let raw = raw_gex(spot, contract.gamma, contract.open_interest, multiplier);
    contract.option_type.dealer_sign(raw)
}

/// Attach exposure to every contract
pub fn compute_gex(
    contracts: Vec<DecodedContract>,
    spot: f64,
    multiplier: f64,
) -> GexResult<Vec<ContractGex>> {
    if !(spot.is_finite() && spot > 0.0) {
        return Err(GexError::invalid_input(format!(
            "spot price must be positive, got {}",
            spot
        )));
    }

    Ok(contracts
        .into_iter()
        .map(|contract| {
            let gex = contract_gex(&contract, spot, multiplier);
            ContractGex { contract, gex }
        })
        .collect())
}

/// Total exposure in dollars
pub fn total_gex(contracts: &[ContractGex]) -> f64 {
    contracts.iter().map(|c| c.gex).sum()
}

/// Total exposure for one side of the book, in dollars
pub fn total_gex_by_type(contracts: &[ContractGex], option_type: OptionType) -> f64 {
    contracts
        .iter()
        .filter(|c| c.option_type() == option_type)
        .map(|c| c.gex)
        .sum()
}

/// Round to 4 decimals for display ("$1.2345 Bn")
pub fn round4(value: f64) -> f64 {
    (value * 1e4).round() / 1e4
}
