//! Per-node migration info: the answer to "where, how, and when does this
//! traveler leave?".
//!
//! A node owns exactly one [`MigrationInfo`] for its whole lifetime.  The
//! variant is chosen once at construction and never changes:
//!
//! | Variant        | Used when                                   | Per-query work      |
//! |----------------|---------------------------------------------|---------------------|
//! | `Null`         | no destinations, or total rate 0            | none                |
//! | `FixedRate`    | rates independent of age and gender         | one draw + search   |
//! | `AgeAndGender` | any rate file is age- or gender-dependent   | CDF rebuild + draw  |

use log::trace;

use mig_core::{Gender, MigrationType, NodeId, NodeRng, Traveler};

use crate::{RateData, RateDistribution, RateTable};

/// Age used to evaluate age-independent tables.
const NEUTRAL_AGE_YEARS: f64 = 0.0;

/// The outcome of a successful migration decision.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MigrationStep {
    pub destination:    NodeId,
    pub migration_type: MigrationType,
    /// Days until departure, drawn from `Exp(effective total rate)`.
    pub wait_time:      f64,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MigrationInfoKind {
    Null,
    FixedRate,
    AgeAndGender,
}

// ── FixedRate ─────────────────────────────────────────────────────────────────

/// One distribution, built once, shared by every traveler.
#[derive(Debug, Clone)]
pub struct FixedRateInfo {
    distribution:  RateDistribution,
    heterogeneity: bool,
}

impl FixedRateInfo {
    pub fn new(tables: &[RateTable], heterogeneity: bool) -> Self {
        Self {
            distribution: RateDistribution::from_tables(tables, NEUTRAL_AGE_YEARS),
            heterogeneity,
        }
    }
}

// ── AgeAndGender ──────────────────────────────────────────────────────────────

/// Tables and a distribution kept per gender; a query rebuilds the
/// distribution of the traveler's gender.
///
/// Storage is asymmetric: `default_tables` serve males (and females when no
/// female-specific data exists); `female_tables` is present only for
/// gender-split data.  Both distributions start out evaluated at age 0, so
/// each gender always has a consistent destination / type / CDF triple.
#[derive(Debug, Clone)]
pub struct AgeAndGenderInfo {
    default_tables:       Vec<RateTable>,
    default_distribution: RateDistribution,
    female_tables:        Option<Vec<RateTable>>,
    female_distribution:  Option<RateDistribution>,
    last_gender:          Gender,
    heterogeneity:        bool,
}

impl AgeAndGenderInfo {
    /// `rate_data[0]` is the default (male) list; `rate_data[1]`, if present,
    /// is female-specific.
    pub fn new(mut rate_data: RateData, heterogeneity: bool) -> Self {
        let female_tables = if rate_data.len() > 1 {
            Some(rate_data.swap_remove(1))
        } else {
            None
        };
        let default_tables = rate_data.into_iter().next().unwrap_or_default();

        let default_distribution = RateDistribution::from_tables(&default_tables, NEUTRAL_AGE_YEARS);
        let female_distribution = female_tables
            .as_deref()
            .map(|tables| RateDistribution::from_tables(tables, NEUTRAL_AGE_YEARS));

        Self {
            default_tables,
            default_distribution,
            female_tables,
            female_distribution,
            last_gender: Gender::Male,
            heterogeneity,
        }
    }

    /// Rebuild the distribution for `gender` at `age_years`.
    pub fn calculate_rates(&mut self, gender: Gender, age_years: f64) {
        self.last_gender = gender;
        match (gender, &self.female_tables, &mut self.female_distribution) {
            (Gender::Female, Some(tables), Some(distribution)) => {
                distribution.calculate_rates(tables, age_years);
            }
            _ => self.default_distribution.calculate_rates(&self.default_tables, age_years),
        }
    }

    /// The distribution `gender` travelers use, as of its most recent query.
    pub fn distribution(&self, gender: Gender) -> &RateDistribution {
        match (gender, &self.female_distribution) {
            (Gender::Female, Some(female)) => female,
            _ => &self.default_distribution,
        }
    }

    /// The distribution of the most recent query of either gender.
    #[inline]
    pub fn last_distribution(&self) -> &RateDistribution {
        self.distribution(self.last_gender)
    }

    /// `true` when male and female travelers use different tables.
    #[inline]
    pub fn is_gender_split(&self) -> bool {
        self.female_tables.is_some()
    }
}

// ── MigrationInfo ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub enum MigrationInfo {
    #[default]
    Null,
    FixedRate(FixedRateInfo),
    AgeAndGender(AgeAndGenderInfo),
}

impl MigrationInfo {
    /// Choose the variant for a node's merged rate data.
    ///
    /// - all lists empty → `Null`
    /// - `age_and_gender_dependent` → `AgeAndGender`
    /// - otherwise `FixedRate` built from the first list, or `Null` if its
    ///   total rate is 0
    pub fn build(rate_data: RateData, age_and_gender_dependent: bool, heterogeneity: bool) -> Self {
        if rate_data.iter().all(Vec::is_empty) {
            return MigrationInfo::Null;
        }
        if age_and_gender_dependent {
            return MigrationInfo::AgeAndGender(AgeAndGenderInfo::new(rate_data, heterogeneity));
        }

        let tables = rate_data.first().map(Vec::as_slice).unwrap_or_default();
        let fixed = FixedRateInfo::new(tables, heterogeneity);
        if fixed.distribution.is_empty() {
            trace!("all {} destination rates are zero; using null migration", tables.len());
            return MigrationInfo::Null;
        }
        MigrationInfo::FixedRate(fixed)
    }

    pub fn kind(&self) -> MigrationInfoKind {
        match self {
            MigrationInfo::Null            => MigrationInfoKind::Null,
            MigrationInfo::FixedRate(_)    => MigrationInfoKind::FixedRate,
            MigrationInfo::AgeAndGender(_) => MigrationInfoKind::AgeAndGender,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, MigrationInfo::Null)
    }

    /// Instantaneous rate of leaving the node at all, in trips per day.
    ///
    /// For `AgeAndGender` this is the rate of the most recent query.
    pub fn total_rate(&self) -> f64 {
        self.distribution().map_or(0.0, RateDistribution::total_rate)
    }

    /// CDF parallel to [`reachable_nodes`](Self::reachable_nodes) for a
    /// traveler of `gender`.
    pub fn cumulative_distribution_function(&self, gender: Gender) -> &[f64] {
        match self.distribution_for(gender) {
            Some(distribution) => distribution.cumulative_distribution_function(),
            None => &[],
        }
    }

    /// Destinations reachable by a traveler of `gender`.  The gender is
    /// ignored unless the variant holds gender-split data.
    pub fn reachable_nodes(&self, gender: Gender) -> &[NodeId] {
        match self.distribution_for(gender) {
            Some(distribution) => distribution.reachable_nodes(),
            None => &[],
        }
    }

    /// Migration tags parallel to [`reachable_nodes`](Self::reachable_nodes).
    pub fn migration_types(&self, gender: Gender) -> &[MigrationType] {
        match self.distribution_for(gender) {
            Some(distribution) => distribution.migration_types(),
            None => &[],
        }
    }

    fn distribution(&self) -> Option<&RateDistribution> {
        match self {
            MigrationInfo::Null            => None,
            MigrationInfo::FixedRate(f)    => Some(&f.distribution),
            MigrationInfo::AgeAndGender(a) => Some(a.last_distribution()),
        }
    }

    fn distribution_for(&self, gender: Gender) -> Option<&RateDistribution> {
        match self {
            MigrationInfo::Null            => None,
            MigrationInfo::FixedRate(f)    => Some(&f.distribution),
            MigrationInfo::AgeAndGender(a) => Some(a.distribution(gender)),
        }
    }

    /// Bring the distribution up to date for `traveler` and return it with
    /// the traveler's effective total rate.
    fn prepare<T: Traveler + ?Sized>(&mut self, traveler: &T) -> Option<(&RateDistribution, f64)> {
        let (distribution, heterogeneity) = match self {
            MigrationInfo::Null => return None,
            MigrationInfo::FixedRate(f) => (&f.distribution, f.heterogeneity),
            MigrationInfo::AgeAndGender(a) => {
                a.calculate_rates(traveler.gender(), traveler.age_years());
                (a.last_distribution(), a.heterogeneity)
            }
        };

        let mut rate = distribution.total_rate();
        if heterogeneity {
            rate *= traveler.migration_rate_modifier();
        }
        if rate.is_nan() || rate <= 0.0 {
            return None;
        }
        Some((distribution, rate))
    }

    /// The deterministic half of [`pick_migration_step`](Self::pick_migration_step):
    /// map a uniform `draw` in `[0, 1)` to a destination, or `None` for "no
    /// migration this step".
    pub fn select_destination<T: Traveler + ?Sized>(
        &mut self,
        draw:     f64,
        traveler: &T,
    ) -> Option<(NodeId, MigrationType)> {
        let (distribution, rate) = self.prepare(traveler)?;
        distribution.select(draw, rate)
    }

    /// Decide whether `traveler` migrates this step, and if so where, by
    /// which mode, and after how long.
    ///
    /// Consumes one uniform draw when the effective rate is positive, and one
    /// exponential draw when a destination is chosen.
    pub fn pick_migration_step<T: Traveler + ?Sized>(
        &mut self,
        rng:      &mut NodeRng,
        traveler: &T,
    ) -> Option<MigrationStep> {
        let (distribution, rate) = self.prepare(traveler)?;
        let (destination, migration_type) = distribution.select(rng.uniform(), rate)?;
        Some(MigrationStep {
            destination,
            migration_type,
            wait_time: rng.exponential(rate),
        })
    }
}
