//! Surface grid construction from the joint (expiration, strike) view

use std::collections::BTreeSet;

use chrono::NaiveDate;
use ndarray::Array2;

use crate::core::{JointView, SurfaceGrid};

/// Pivot the joint view into a dense strike × expiration grid.
///
/// Pairs absent from the view become 0.0; an empty view yields an empty grid.
pub fn build_surface(view: &JointView) -> SurfaceGrid {
    if view.is_empty() {
        return SurfaceGrid::empty(view.scale());
    }

    let strikes: Vec<u32> = view
        .keys()
        .map(|(_, strike)| strike)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let expirations: Vec<NaiveDate> = view
        .keys()
        .map(|(expiration, _)| expiration)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect();

    let mut values: Array2<f64> = Array2::zeros((strikes.len(), expirations.len()));
    for ((expiration, strike), value) in view.iter() {
        // Both lookups hit: the axes were collected from these keys
        if let (Ok(row), Ok(col)) = (
            strikes.binary_search(&strike),
            expirations.binary_search_by(|probe| expiration.cmp(probe)),
        ) {
            values[[row, col]] = value;
        }
    }

    SurfaceGrid::new(strikes, expirations, values, view.scale())
}
