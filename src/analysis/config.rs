//! Configuration for the GEX analysis pipeline

use std::fs;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{GexError, GexResult};

/// Standard equity option multiplier
pub const CONTRACT_MULTIPLIER: f64 = 100.0;

/// Configuration for a GEX analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Shares per contract
    /// Default: 100
    pub multiplier: f64,
    /// Strike display band around spot
    pub strike_band: StrikeBand,
    /// Expiration display horizon
    pub horizon: Horizon,
    /// Target number of strike labels for the strike view
    /// Default: 20
    pub strike_tick_target: usize,
    /// Target number of labels per surface axis
    /// Default: 10
    pub surface_tick_target: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            multiplier: CONTRACT_MULTIPLIER,
            strike_band: StrikeBand::default(),
            horizon: Horizon::default(),
            strike_tick_target: 20,
            surface_tick_target: 10,
        }
    }
}

impl AnalysisConfig {
    /// Wider view: ±30% strikes, two years of expirations
    pub fn wide() -> Self {
        Self {
            strike_band: StrikeBand::symmetric(0.30),
            horizon: Horizon {
                days: 730,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Near-term view: ±10% strikes, 60 days of expirations
    pub fn near_term() -> Self {
        Self {
            strike_band: StrikeBand::symmetric(0.10),
            horizon: Horizon {
                days: 60,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Load from a JSON file; absent fields take defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> GexResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json).map_err(|e| {
            GexError::config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GexResult<()> {
        if !(self.multiplier.is_finite() && self.multiplier > 0.0) {
            return Err(GexError::config(format!(
                "multiplier must be positive, got {}",
                self.multiplier
            )));
        }
        self.strike_band.validate()?;
        if self.horizon.days <= 0 {
            return Err(GexError::config(format!(
                "horizon must be at least one day, got {}",
                self.horizon.days
            )));
        }
        Ok(())
    }
}

/// Strike band as fractions of spot.
/// A strike is shown when `lower * spot < strike < upper * spot`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrikeBand {
    /// Default: 0.85
    pub lower: f64,
    /// Default: 1.15
    pub upper: f64,
}

impl Default for StrikeBand {
    fn default() -> Self {
        Self {
            lower: 0.85,
            upper: 1.15,
        }
    }
}

impl StrikeBand {
    /// ±`width` around spot (0.15 → 0.85..1.15)
    pub fn symmetric(width: f64) -> Self {
        Self {
            lower: 1.0 - width,
            upper: 1.0 + width,
        }
    }

    /// Both bounds exclusive
    pub fn contains(&self, strike: u32, spot: f64) -> bool {
        let strike = f64::from(strike);
        strike > spot * self.lower && strike < spot * self.upper
    }

    pub fn validate(&self) -> GexResult<()> {
        if !(self.lower > 0.0 && self.lower < self.upper && self.upper.is_finite()) {
            return Err(GexError::config(format!(
                "strike band must satisfy 0 < lower < upper, got {}..{}",
                self.lower, self.upper
            )));
        }
        Ok(())
    }
}

/// Expiration horizon relative to the analysis date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Horizon {
    /// Keep expirations up to and including `as_of + days`
    /// Default: 365
    pub days: i64,
    /// Also drop expirations before `as_of`
    /// Default: false (expired contracts stay in)
    pub exclude_expired: bool,
}

impl Default for Horizon {
    fn default() -> Self {
        Self {
            days: 365,
            exclude_expired: false,
        }
    }
}

impl Horizon {
    /// Last included date
    pub fn cutoff(&self, as_of: NaiveDate) -> NaiveDate {
        as_of + Duration::days(self.days)
    }

    pub fn contains(&self, expiration: NaiveDate, as_of: NaiveDate) -> bool {
        if self.exclude_expired && expiration < as_of {
            return false;
        }
        expiration <= self.cutoff(as_of)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_strike_band_bounds_are_exclusive() {
        let band = StrikeBand::default();

        assert!(band.contains(100, 100.0));
        assert!(band.contains(86, 100.0));
        assert!(band.contains(114, 100.0));
        assert!(!band.contains(85, 100.0));
        assert!(!band.contains(115, 100.0));
        assert!(!band.contains(200, 100.0));
    }

    #[test]
    fn test_horizon() {
        let as_of = date(2025, 1, 1);
        let horizon = Horizon::default();

        assert_eq!(horizon.cutoff(as_of), date(2026, 1, 1));
        assert!(horizon.contains(date(2025, 12, 31), as_of));
        // The cutoff day itself is still inside
        assert!(horizon.contains(date(2026, 1, 1), as_of));
        assert!(!horizon.contains(date(2026, 1, 2), as_of));
        // No lower bound by default
        assert!(horizon.contains(date(2024, 12, 20), as_of));

        let strict = Horizon {
            exclude_expired: true,
            ..horizon
        };
        assert!(!strict.contains(date(2024, 12, 20), as_of));
        assert!(strict.contains(as_of, as_of));
    }

    #[test]
    fn test_presets_validate() {
        assert!(AnalysisConfig::default().validate().is_ok());
        assert!(AnalysisConfig::wide().validate().is_ok());
        assert!(AnalysisConfig::near_term().validate().is_ok());

        let bad = AnalysisConfig {
            strike_band: StrikeBand {
                lower: 1.2,
                upper: 1.1,
            },
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(GexError::Config(_))));

        let bad = AnalysisConfig {
            multiplier: 0.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_from_json_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gex.json");
        fs::write(&path, r#"{"horizon": {"days": 90}}"#).unwrap();

        let config = AnalysisConfig::from_json_file(&path).unwrap();
        assert_eq!(config.horizon.days, 90);
        assert!(!config.horizon.exclude_expired);
        assert_eq!(config.multiplier, 100.0);
        assert_eq!(config.strike_band, StrikeBand::default());

        fs::write(&path, r#"{"multiplier": -1.0}"#).unwrap();
        assert!(AnalysisConfig::from_json_file(&path).is_err());
    }
}
