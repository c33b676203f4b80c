//! GEX Surface
//!
//! Dense strike × expiration grid of aggregated exposure, ready for 3-D
//! rendering. Rows follow `strikes` (ascending), columns follow
//! `expirations` (descending, latest first).

use chrono::NaiveDate;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::view::{tick_step, Scale};

/// Label format for expiration ticks
pub const EXPIRATION_LABEL_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceGrid {
    /// Unique strikes, ascending (row axis)
    pub strikes: Vec<u32>,
    /// Unique expirations, descending (column axis)
    pub expirations: Vec<NaiveDate>,
    /// Grid [strike, expiration] -> GEX; zero where nothing was observed
    pub values: Array2<f64>,
    /// Unit of `values`
    pub scale: Scale,
    /// (min, max) over `values`, for color bounds
    range: Option<(f64, f64)>,
}

impl SurfaceGrid {
    /// Wrap a grid and compute its value range.
    ///
    /// `values` must have shape `(strikes.len(), expirations.len())`.
    pub fn new(
        strikes: Vec<u32>,
        expirations: Vec<NaiveDate>,
        values: Array2<f64>,
        scale: Scale,
    ) -> Self {
        debug_assert_eq!(values.dim(), (strikes.len(), expirations.len()));

        let range = values.iter().fold(None, |acc: Option<(f64, f64)>, &v| {
            Some(match acc {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            })
        });

        Self {
            strikes,
            expirations,
            values,
            scale,
            range,
        }
    }

    /// The "no data" grid
    pub fn empty(scale: Scale) -> Self {
        Self::new(Vec::new(), Vec::new(), Array2::zeros((0, 0)), scale)
    }

    pub fn is_empty(&self) -> bool {
        self.strikes.is_empty() || self.expirations.is_empty()
    }

    /// (rows, columns) = (strikes, expirations)
    pub fn dim(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Color-scale bounds; `None` for an empty grid
    pub fn range(&self) -> Option<(f64, f64)> {
        self.range
    }

    pub fn strike_index(&self, strike: u32) -> Option<usize> {
        self.strikes.binary_search(&strike).ok()
    }

    pub fn expiration_index(&self, expiration: NaiveDate) -> Option<usize> {
        // Descending axis
        self.expirations
            .binary_search_by(|probe| expiration.cmp(probe))
            .ok()
    }

    /// Cell value; `None` when either coordinate is off the axes
    pub fn value_at(&self, expiration: NaiveDate, strike: u32) -> Option<f64> {
        let row = self.strike_index(strike)?;
        let col = self.expiration_index(expiration)?;
        Some(self.values[[row, col]])
    }

    /// Expiration labels for the full axis
    pub fn expiration_labels(&self) -> Vec<String> {
        self.expirations
            .iter()
            .map(|d| d.format(EXPIRATION_LABEL_FORMAT).to_string())
            .collect()
    }

    /// Thinned expiration tick labels (about `target` of them)
    pub fn expiration_ticks(&self, target: usize) -> Vec<String> {
        let step = tick_step(self.expirations.len(), target);
        self.expirations
            .iter()
            .step_by(step)
            .map(|d| d.format(EXPIRATION_LABEL_FORMAT).to_string())
            .collect()
    }

    /// Thinned strike tick labels (about `target` of them)
    pub fn strike_ticks(&self, target: usize) -> Vec<u32> {
        let step = tick_step(self.strikes.len(), target);
        self.strikes.iter().step_by(step).copied().collect()
    }

    /// Sum over all cells, in the grid's scale
    pub fn total(&self) -> f64 {
        self.values.sum()
    }
}
