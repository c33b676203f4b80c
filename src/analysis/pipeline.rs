//! End-to-end GEX analysis for one snapshot

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::{expiration_view, joint_view, strike_view};
use super::config::AnalysisConfig;
use super::exposure::{compute_gex, round4, total_gex, total_gex_by_type};
use super::grid::build_surface;
use super::normalize::normalize_contracts;
use crate::core::{
    ExpirationView, FeedSnapshot, GexResult, JointView, OptionType, StrikeView, SurfaceGrid,
};

/// Everything one analysis run produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GexReport {
    pub ticker: String,
    pub spot: f64,
    /// Date the horizon is measured from
    pub as_of: NaiveDate,
    /// When the underlying snapshot was retrieved
    pub snapshot_time: DateTime<Utc>,
    /// Contracts in the snapshot
    pub contract_count: usize,
    /// Total notional GEX (Bn$), all contracts, unfiltered
    pub total_gex_bn: f64,
    /// Call side (Bn$)
    pub call_gex_bn: f64,
    /// Put side (Bn$)
    pub put_gex_bn: f64,
    pub by_strike: StrikeView,
    pub by_expiration: ExpirationView,
    pub by_expiration_and_strike: JointView,
    pub surface: SurfaceGrid,
    /// Label spacing for the strike view
    pub strike_tick_step: usize,
    /// Label target per surface axis
    pub surface_tick_target: usize,
}

impl GexReport {
    /// Strike labels to draw on the strike view
    pub fn strike_ticks(&self) -> Vec<u32> {
        self.by_strike
            .keys()
            .step_by(self.strike_tick_step)
            .collect()
    }

    /// True when none of the filtered views has data
    pub fn is_empty(&self) -> bool {
        self.by_strike.is_empty() && self.by_expiration.is_empty() && self.surface.is_empty()
    }
}

/// Runs the decode → exposure → aggregate → surface pipeline
#[derive(Debug, Clone, Default)]
pub struct GexAnalyzer {
    config: AnalysisConfig,
}

impl GexAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a snapshot as of today (UTC)
    pub fn analyze_today(&self, snapshot: &FeedSnapshot) -> GexResult<GexReport> {
        self.analyze(snapshot, Utc::now().date_naive())
    }

    /// Analyze a snapshot with the horizon measured from `as_of`
    pub fn analyze(&self, snapshot: &FeedSnapshot, as_of: NaiveDate) -> GexResult<GexReport> {
        let config = &self.config;
        config.validate()?;

        let contracts = normalize_contracts(&snapshot.contracts)?;
        let contracts = compute_gex(contracts, snapshot.spot, config.multiplier)?;

        let total_gex_bn = total_gex(&contracts) / 1e9;
        tracing::info!(
            "{}: Total notional GEX: ${} Bn ({} contracts, spot {})",
            snapshot.ticker,
            round4(total_gex_bn),
            contracts.len(),
            snapshot.spot
        );

        let by_strike = strike_view(&contracts, snapshot.spot, &config.strike_band);
        let by_expiration = expiration_view(&contracts, as_of, &config.horizon);
        let by_expiration_and_strike = joint_view(
            &contracts,
            snapshot.spot,
            as_of,
            &config.strike_band,
            &config.horizon,
        );
        let surface = build_surface(&by_expiration_and_strike);

        tracing::debug!(
            "{}: {} strikes, {} expirations, surface {:?}",
            snapshot.ticker,
            by_strike.len(),
            by_expiration.len(),
            surface.dim()
        );

        Ok(GexReport {
            ticker: snapshot.ticker.clone(),
            spot: snapshot.spot,
            as_of,
            snapshot_time: snapshot.timestamp,
            contract_count: contracts.len(),
            total_gex_bn,
            call_gex_bn: total_gex_by_type(&contracts, OptionType::Call) / 1e9,
            put_gex_bn: total_gex_by_type(&contracts, OptionType::Put) / 1e9,
            strike_tick_step: by_strike.tick_step(config.strike_tick_target),
            surface_tick_target: config.surface_tick_target,
            by_strike,
            by_expiration,
            by_expiration_and_strike,
            surface,
        })
    }
}

/// Analyze a snapshot with default settings as of today
pub fn analyze_snapshot(snapshot: &FeedSnapshot) -> GexResult<GexReport> {
    GexAnalyzer::new().analyze_today(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{format_symbol, GexError, NormalizationError, RawContract};
    use chrono::Duration;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    fn two_leg_snapshot() -> FeedSnapshot {
        let expiry = as_of() + Duration::days(30);
        FeedSnapshot::new(
            "TEST",
            100.0,
            vec![
                RawContract::new(format_symbol("TEST", OptionType::Call, 105.0, expiry), 0.05, 1000.0),
                RawContract::new(format_symbol("TEST", OptionType::Put, 95.0, expiry), 0.04, 800.0),
            ],
        )
    }

    #[test]
    fn test_end_to_end_example() {
        let report = GexAnalyzer::new().analyze(&two_leg_snapshot(), as_of()).unwrap();
        let expiry = as_of() + Duration::days(30);

        // Call: 100 · 0.05 · 1000 · 100 · 100 · 0.01 = 500,000
        // Put: -(100 · 0.04 · 800 · 100 · 100 · 0.01) = -320,000
        assert_eq!(report.contract_count, 2);
        assert!((report.total_gex_bn - 0.00018).abs() < 1e-12);
        assert!((report.call_gex_bn - 0.0005).abs() < 1e-12);
        assert!((report.put_gex_bn + 0.00032).abs() < 1e-12);

        assert_eq!(report.by_strike.len(), 2);
        assert!((report.by_strike.get(&105).unwrap() - 0.0005).abs() < 1e-12);
        assert!((report.by_strike.get(&95).unwrap() + 0.00032).abs() < 1e-12);
        assert_eq!(report.strike_tick_step, 1);

        assert_eq!(report.by_expiration.len(), 1);
        assert!((report.by_expiration.get(&expiry).unwrap() - 0.00018).abs() < 1e-12);

        let surface = &report.surface;
        assert_eq!(surface.dim(), (2, 1));
        assert_eq!(surface.strikes, vec![95, 105]);
        assert_eq!(surface.expirations, vec![expiry]);
        assert!((surface.value_at(expiry, 105).unwrap() - 0.5).abs() < 1e-9);
        assert!((surface.value_at(expiry, 95).unwrap() + 0.32).abs() < 1e-9);
        assert!(!surface.values.iter().any(|v| *v == 0.0));
        assert!(!report.is_empty());
    }

    #[test]
    fn test_bad_record_fails_without_partial_report() {
        let mut snapshot = two_leg_snapshot();
        snapshot.contracts.push(RawContract::new("NOT-A-SYMBOL", 0.01, 1.0));

        let err = GexAnalyzer::new().analyze(&snapshot, as_of()).unwrap_err();
        match err {
            GexError::Normalization(NormalizationError::Decode { index, .. }) => {
                assert_eq!(index, 2)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_everything_filtered_is_a_valid_empty_report() {
        // Strikes far outside ±15% of spot
        let report = GexAnalyzer::new()
            .analyze(
                &FeedSnapshot::new("TEST", 1000.0, two_leg_snapshot().contracts),
                as_of(),
            )
            .unwrap();

        assert!(report.by_strike.is_empty());
        assert!(report.surface.is_empty());
        assert_eq!(report.by_expiration.len(), 1);
        assert!(report.strike_ticks().is_empty());
    }

    #[test]
    fn test_penny_strikes_are_decoded_and_banded_out() {
        let expiry = as_of() + Duration::days(30);
        let snapshot = FeedSnapshot::new(
            "SNDL",
            1.6,
            vec![
                RawContract::new(format_symbol("SNDL", OptionType::Call, 0.5, expiry), 0.3, 500.0),
                RawContract::new(format_symbol("SNDL", OptionType::Call, 1.5, expiry), 0.4, 900.0),
            ],
        );

        let report = GexAnalyzer::new().analyze(&snapshot, as_of()).unwrap();

        assert_eq!(report.contract_count, 2);
        // Strikes truncate to 0 and 1, both outside 1.36..1.84
        assert!(report.by_strike.is_empty());
        assert!(report.surface.is_empty());
        assert_eq!(report.by_expiration.len(), 1);
    }

    #[test]
    fn test_expiration_on_horizon_day_is_kept() {
        let expiry = as_of() + Duration::days(365);
        let snapshot = FeedSnapshot::new(
            "TEST",
            100.0,
            vec![RawContract::new(format_symbol("TEST", OptionType::Call, 100.0, expiry), 0.05, 10.0)],
        );

        let report = GexAnalyzer::new().analyze(&snapshot, as_of()).unwrap();

        assert_eq!(report.by_expiration.len(), 1);
        assert!(report.by_expiration.contains(&expiry));
        assert_eq!(report.surface.dim(), (1, 1));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = AnalysisConfig::default();
        config.horizon.days = 0;

        let result = GexAnalyzer::with_config(config).analyze(&two_leg_snapshot(), as_of());
        assert!(matches!(result, Err(GexError::Config(_))));
    }

    #[test]
    fn test_report_serializes() {
        let report = GexAnalyzer::new().analyze(&two_leg_snapshot(), as_of()).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let back: GexReport = serde_json::from_str(&json).unwrap();

        assert_eq!(
            back.by_strike.keys().collect::<Vec<_>>(),
            report.by_strike.keys().collect::<Vec<_>>()
        );
        assert!((back.total_gex_bn - report.total_gex_bn).abs() < 1e-15);
        assert_eq!(back.surface.dim(), (2, 1));
        assert_eq!(back.surface.expirations, report.surface.expirations);
    }
}
