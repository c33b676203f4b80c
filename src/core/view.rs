//! Aggregated GEX views
//!
//! Summed exposure keyed by strike, expiration, or both.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display unit for aggregated dollar values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scale {
    Units,
    Millions,
    Billions,
}

impl Scale {
    pub fn divisor(&self) -> f64 {
        match self {
            Scale::Units => 1.0,
            Scale::Millions => 1e6,
            Scale::Billions => 1e9,
        }
    }

    /// Short suffix for axis titles ("Bn$", "M$")
    pub fn label(&self) -> &'static str {
        match self {
            Scale::Units => "",
            Scale::Millions => "M",
            Scale::Billions => "Bn",
        }
    }

    pub fn apply(&self, dollars: f64) -> f64 {
        dollars / self.divisor()
    }
}

/// Sorted `(key, value)` pairs with unique keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateView<K> {
    scale: Scale,
    entries: Vec<(K, f64)>,
}

/// GEX by strike (Bn$)
pub type StrikeView = AggregateView<u32>;
/// GEX by expiration (Bn$)
pub type ExpirationView = AggregateView<NaiveDate>;
/// GEX by (expiration, strike) (M$)
pub type JointView = AggregateView<(NaiveDate, u32)>;

impl<K: Ord + Copy> AggregateView<K> {
    /// Build from dollar sums, converting to `scale`
    pub fn from_sums(sums: BTreeMap<K, f64>, scale: Scale) -> Self {
        Self {
            scale,
            entries: sums.into_iter().map(|(k, v)| (k, scale.apply(v))).collect(),
        }
    }

    pub fn empty(scale: Scale) -> Self {
        Self {
            scale,
            entries: Vec::new(),
        }
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn get(&self, key: &K) -> Option<f64> {
        self.entries
            .binary_search_by(|(k, _)| k.cmp(key))
            .ok()
            .map(|i| self.entries[i].1)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(K, f64)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, v)| *v)
    }

    /// Sum of all values, in the view's scale
    pub fn total(&self) -> f64 {
        self.values().sum()
    }

    pub fn first_key(&self) -> Option<K> {
        self.entries.first().map(|(k, _)| *k)
    }

    pub fn last_key(&self) -> Option<K> {
        self.entries.last().map(|(k, _)| *k)
    }

    /// Keep entries whose key satisfies `keep`
    pub fn retain(mut self, mut keep: impl FnMut(&K) -> bool) -> Self {
        self.entries.retain(|(k, _)| keep(k));
        self
    }

    /// Label spacing so that at most about `target` ticks are shown
    pub fn tick_step(&self, target: usize) -> usize {
        tick_step(self.len(), target)
    }
}

/// `max(1, count / target)`
pub fn tick_step(count: usize, target: usize) -> usize {
    if target == 0 {
        return 1;
    }
    (count / target).max(1)
}
