//! Weighted destination choice for one (gender, age) configuration.

use mig_core::{MigrationType, NodeId};

use crate::RateTable;

/// Parallel destination / type / CDF lists plus their total rate.
///
/// Invariants after [`calculate_rates`](Self::calculate_rates):
///
/// - `reachable_nodes`, `migration_types` and `cdf` have equal length.
/// - If non-empty, `cdf` is non-decreasing and its last element is exactly
///   `1.0`, and `total_rate > 0`.
/// - If the summed rate is 0 all three lists are empty and `total_rate == 0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateDistribution {
    reachable_nodes: Vec<NodeId>,
    migration_types: Vec<MigrationType>,
    cdf:             Vec<f64>,
    total_rate:      f64,
}

impl RateDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a distribution from `tables` evaluated at `age_years`.
    pub fn from_tables(tables: &[RateTable], age_years: f64) -> Self {
        let mut distribution = Self::new();
        distribution.calculate_rates(tables, age_years);
        distribution
    }

    /// Re-derive all lists from `tables` evaluated at `age_years`, reusing
    /// the existing allocations.
    pub fn calculate_rates(&mut self, tables: &[RateTable], age_years: f64) {
        self.reachable_nodes.clear();
        self.migration_types.clear();
        self.cdf.clear();

        for table in tables {
            self.reachable_nodes.push(table.destination());
            self.migration_types.push(table.migration_type());
            self.cdf.push(table.get_rate(age_years));
        }

        self.normalize_rates();
    }

    /// Turn the raw per-destination rates held in `cdf` into a CDF.
    fn normalize_rates(&mut self) {
        let mut running = 0.0;
        for entry in self.cdf.iter_mut() {
            running += *entry;
            *entry = running;
        }
        self.total_rate = running;

        if self.total_rate <= 0.0 || !self.total_rate.is_finite() {
            self.reachable_nodes.clear();
            self.migration_types.clear();
            self.cdf.clear();
            self.total_rate = 0.0;
            return;
        }

        for entry in self.cdf.iter_mut() {
            *entry /= self.total_rate;
        }
        if let Some(last) = self.cdf.last_mut() {
            *last = 1.0;
        }
    }

    /// Choose a destination for a uniform `draw` in `[0, 1)` given the
    /// traveler's effective total rate.
    ///
    /// Returns `None` when `draw >= effective_rate` (no migration this step)
    /// or the distribution is empty.  Otherwise the draw is rescaled to
    /// `x = draw / effective_rate` and the leftmost index with `cdf[i] >= x`
    /// is chosen, so destination `i` owns `(cdf[i-1], cdf[i]]`.
    ///
    /// Leading entries with `cdf[i] == 0` are skipped: they are the only
    /// zero-width entries a leftmost `>=` search can land on (at `x == 0`).
    pub fn select(&self, draw: f64, effective_rate: f64) -> Option<(NodeId, MigrationType)> {
        if self.cdf.is_empty() || effective_rate.is_nan() || effective_rate <= 0.0 || draw >= effective_rate {
            return None;
        }
        let x = draw / effective_rate;
        let index = self
            .cdf
            .partition_point(|&c| c < x || c <= 0.0)
            .min(self.cdf.len() - 1);
        Some((self.reachable_nodes[index], self.migration_types[index]))
    }

    #[inline]
    pub fn reachable_nodes(&self) -> &[NodeId] {
        &self.reachable_nodes
    }

    #[inline]
    pub fn migration_types(&self) -> &[MigrationType] {
        &self.migration_types
    }

    #[inline]
    pub fn cumulative_distribution_function(&self) -> &[f64] {
        &self.cdf
    }

    #[inline]
    pub fn total_rate(&self) -> f64 {
        self.total_rate
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cdf.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cdf.len()
    }
}
