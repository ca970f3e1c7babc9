//! Per-destination, per-type migration rate as a function of age.

use std::str::FromStr;

use mig_core::{MigrationType, NodeId};

use crate::{RatesError, RatesResult};

/// How a [`RateTable`] evaluates ages between breakpoints.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationType {
    /// Straight line between neighbouring breakpoints; clamped outside.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "LINEAR_INTERPOLATION"))]
    Linear,
    /// Rate of the last breakpoint at or below the queried age.
    #[cfg_attr(feature = "serde", serde(rename = "PIECEWISE_CONSTANT"))]
    PiecewiseConstant,
}

impl InterpolationType {
    pub fn as_str(self) -> &'static str {
        match self {
            InterpolationType::Linear            => "LINEAR_INTERPOLATION",
            InterpolationType::PiecewiseConstant => "PIECEWISE_CONSTANT",
        }
    }
}

impl FromStr for InterpolationType {
    type Err = RatesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "LINEAR_INTERPOLATION" => Ok(InterpolationType::Linear),
            "PIECEWISE_CONSTANT"   => Ok(InterpolationType::PiecewiseConstant),
            other => Err(RatesError::UnknownInterpolation(other.to_string())),
        }
    }
}

impl std::fmt::Display for InterpolationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── RateTable ─────────────────────────────────────────────────────────────────

/// Trips per day from the owning node to `destination` by `migration_type`,
/// as a piecewise function of the traveler's age in years.
///
/// Breakpoint ages are strictly increasing and every rate is finite and
/// non-negative; [`add_rate`](Self::add_rate) enforces both.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    destination:    NodeId,
    migration_type: MigrationType,
    interpolation:  InterpolationType,
    ages_years:     Vec<f64>,
    rates:          Vec<f64>,
}

impl RateTable {
    pub fn new(
        destination:    NodeId,
        migration_type: MigrationType,
        interpolation:  InterpolationType,
    ) -> Self {
        Self {
            destination,
            migration_type,
            interpolation,
            ages_years: Vec::new(),
            rates:      Vec::new(),
        }
    }

    /// A single-breakpoint table: the same `rate` at every age.
    pub fn constant(
        destination:    NodeId,
        migration_type: MigrationType,
        rate:           f64,
    ) -> RatesResult<Self> {
        let mut table = Self::new(destination, migration_type, InterpolationType::PiecewiseConstant);
        table.add_rate(0.0, rate)?;
        Ok(table)
    }

    /// Append a breakpoint.  `age_years` must exceed every previous age.
    pub fn add_rate(&mut self, age_years: f64, rate: f64) -> RatesResult<()> {
        if let Some(&last) = self.ages_years.last() {
            if age_years <= last || age_years.is_nan() {
                return Err(RatesError::NonIncreasingAge { last, got: age_years });
            }
        }
        if !rate.is_finite() || rate < 0.0 {
            return Err(RatesError::InvalidRate { age: age_years, rate });
        }
        self.ages_years.push(age_years);
        self.rates.push(rate);
        Ok(())
    }

    /// Evaluate the curve at `age_years`.  An empty table has rate 0.
    pub fn get_rate(&self, age_years: f64) -> f64 {
        let n = self.rates.len();
        if n == 0 {
            return 0.0;
        }
        if age_years <= self.ages_years[0] {
            return self.rates[0];
        }
        if age_years >= self.ages_years[n - 1] {
            return self.rates[n - 1];
        }

        // ages[i-1] <= age < ages[i], with 1 <= i <= n-1.
        let i = self.ages_years.partition_point(|&a| a <= age_years);
        match self.interpolation {
            InterpolationType::PiecewiseConstant => self.rates[i - 1],
            InterpolationType::Linear => {
                let (a0, a1) = (self.ages_years[i - 1], self.ages_years[i]);
                let (r0, r1) = (self.rates[i - 1], self.rates[i]);
                r0 + (r1 - r0) * (age_years - a0) / (a1 - a0)
            }
        }
    }

    #[inline]
    pub fn num_rates(&self) -> usize {
        self.rates.len()
    }

    #[inline]
    pub fn destination(&self) -> NodeId {
        self.destination
    }

    #[inline]
    pub fn migration_type(&self) -> MigrationType {
        self.migration_type
    }

    #[inline]
    pub fn interpolation(&self) -> InterpolationType {
        self.interpolation
    }

    pub fn ages_years(&self) -> &[f64] {
        &self.ages_years
    }

    pub fn rates(&self) -> &[f64] {
        &self.rates
    }
}
