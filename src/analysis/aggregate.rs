//! Grouping of per-contract GEX
//!
//! Three views over the same contracts:
//! - by strike (Bn$), limited to the strike band around spot
//! - by expiration (Bn$), limited to the horizon
//! - by (expiration, strike) (M$), limited by both

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::config::{Horizon, StrikeBand};
use crate::core::{
    AggregateView, ContractGex, ExpirationView, JointView, Scale, StrikeView,
};

/// Sum `gex` by key over contracts accepted by `keep`
fn group_by<K, F, P>(contracts: &[ContractGex], key: F, mut keep: P, scale: Scale) -> AggregateView<K>
where
    K: Ord + Copy,
    F: Fn(&ContractGex) -> K,
    P: FnMut(&ContractGex) -> bool,
{
    let mut sums: BTreeMap<K, f64> = BTreeMap::new();
    for c in contracts.iter().filter(|c| keep(*c)) {
        *sums.entry(key(c)).or_insert(0.0) += c.gex;
    }
    AggregateView::from_sums(sums, scale)
}

/// All strikes, unfiltered
pub fn group_by_strike(contracts: &[ContractGex], scale: Scale) -> StrikeView {
    group_by(contracts, ContractGex::strike, |_| true, scale)
}

/// All expirations, unfiltered
pub fn group_by_expiration(contracts: &[ContractGex], scale: Scale) -> ExpirationView {
    group_by(contracts, ContractGex::expiration, |_| true, scale)
}

/// All (expiration, strike) pairs, unfiltered
pub fn group_by_expiration_and_strike(contracts: &[ContractGex], scale: Scale) -> JointView {
    group_by(contracts, |c| (c.expiration(), c.strike()), |_| true, scale)
}

/// GEX by strike in Bn$, strikes strictly inside the band
pub fn strike_view(contracts: &[ContractGex], spot: f64, band: &StrikeBand) -> StrikeView {
    let view = group_by_strike(contracts, Scale::Billions).retain(|k| band.contains(*k, spot));
    if view.is_empty() {
        tracing::warn!("No strikes within {:.2}..{:.2} of spot {}", band.lower, band.upper, spot);
    }
    view
}

/// GEX by expiration in Bn$, expirations inside the horizon
pub fn expiration_view(contracts: &[ContractGex], as_of: NaiveDate, horizon: &Horizon) -> ExpirationView {
    let view = group_by(
        contracts,
        ContractGex::expiration,
        |c| horizon.contains(c.expiration(), as_of),
        Scale::Billions,
    );
    if view.is_empty() {
        tracing::warn!("No expirations on or before {}", horizon.cutoff(as_of));
    }
    view
}

/// GEX by (expiration, strike) in M$, both filters applied
pub fn joint_view(
    contracts: &[ContractGex],
    spot: f64,
    as_of: NaiveDate,
    band: &StrikeBand,
    horizon: &Horizon,
) -> JointView {
    group_by(
        contracts,
        |c| (c.expiration(), c.strike()),
        |c| horizon.contains(c.expiration(), as_of) && band.contains(c.strike(), spot),
        Scale::Millions,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::exposure::total_gex;
    use crate::core::{DecodedContract, OptionType};
    use chrono::Duration;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    fn gex(option_type: OptionType, strike: u32, days: i64, gex: f64) -> ContractGex {
        ContractGex {
            contract: DecodedContract {
                symbol: String::new(),
                option_type,
                strike,
                expiration: as_of() + Duration::days(days),
                gamma: 0.0,
                open_interest: 0,
            },
            gex,
        }
    }

    /// Mixed book around spot 100
    fn book() -> Vec<ContractGex> {
        vec![
            gex(OptionType::Call, 105, 30, 5_000_000.0),
            gex(OptionType::Put, 95, 30, -3_200_000.0),
            gex(OptionType::Call, 105, 60, 1_000_000.0),
            gex(OptionType::Put, 105, 30, -500_000.0),
            gex(OptionType::Call, 130, 30, 7_000_000.0),
            gex(OptionType::Put, 70, 400, -9_000_000.0),
            gex(OptionType::Call, 100, -3, 250_000.0),
            gex(OptionType::Put, 85, 10, -100_000.0),
        ]
    }

    #[test]
    fn test_grouping_conserves_total() {
        let book = book();
        let total_bn = total_gex(&book) / 1e9;

        assert!((group_by_strike(&book, Scale::Billions).total() - total_bn).abs() < 1e-12);
        assert!((group_by_expiration(&book, Scale::Billions).total() - total_bn).abs() < 1e-12);
        assert!(
            (group_by_expiration_and_strike(&book, Scale::Billions).total() - total_bn).abs()
                < 1e-12
        );
    }

    #[test]
    fn test_strike_view_sums_and_filters() {
        let view = strike_view(&book(), 100.0, &StrikeBand::default());

        assert_eq!(view.keys().collect::<Vec<_>>(), vec![95, 100, 105]);
        assert!((view.get(&105).unwrap() - 0.0055).abs() < 1e-12);
        assert!((view.get(&95).unwrap() + 0.0032).abs() < 1e-12);
        // 85 sits exactly on the lower bound
        assert!(!view.contains(&85));
        assert_eq!(view.scale(), Scale::Billions);
    }

    #[test]
    fn test_expiration_view_keeps_expired() {
        let view = expiration_view(&book(), as_of(), &Horizon::default());

        assert_eq!(view.len(), 4);
        assert!(view.contains(&(as_of() - Duration::days(3))));
        assert!(!view.contains(&(as_of() + Duration::days(400))));

        let strict = Horizon {
            exclude_expired: true,
            ..Default::default()
        };
        assert_eq!(expiration_view(&book(), as_of(), &strict).len(), 3);
    }

    #[test]
    fn test_joint_view_applies_both_filters() {
        let view = joint_view(
            &book(),
            100.0,
            as_of(),
            &StrikeBand::default(),
            &Horizon::default(),
        );

        let d30 = as_of() + Duration::days(30);
        assert_eq!(view.len(), 4);
        assert!((view.get(&(d30, 105)).unwrap() - 4.5).abs() < 1e-9);
        assert!((view.get(&(d30, 95)).unwrap() + 3.2).abs() < 1e-9);
        assert!(!view.contains(&(d30, 130)));
        // Expired but inside the band
        assert!(view.contains(&(as_of() - Duration::days(3), 100)));
        assert_eq!(view.scale(), Scale::Millions);
    }

    #[test]
    fn test_narrowing_filters_never_adds_groups() {
        let book = book();
        let widths = [0.5, 0.3, 0.15, 0.05, 0.01];
        let counts: Vec<usize> = widths
            .iter()
            .map(|w| strike_view(&book, 100.0, &StrikeBand::symmetric(*w)).len())
            .collect();
        assert!(counts.windows(2).all(|w| w[1] <= w[0]), "{counts:?}");

        let horizons = [1000, 365, 45, 20, 1];
        let counts: Vec<usize> = horizons
            .iter()
            .map(|days| {
                let h = Horizon {
                    days: *days,
                    ..Default::default()
                };
                expiration_view(&book, as_of(), &h).len()
            })
            .collect();
        assert!(counts.windows(2).all(|w| w[1] <= w[0]), "{counts:?}");
    }

    #[test]
    fn test_empty_input() {
        assert!(strike_view(&[], 100.0, &StrikeBand::default()).is_empty());
        assert!(expiration_view(&[], as_of(), &Horizon::default()).is_empty());
    }
}
