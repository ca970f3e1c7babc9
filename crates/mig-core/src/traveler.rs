//! The traveler-facing view of an agent: age, gender, and rate modifier.
//!
//! Individual lifecycle is owned elsewhere; migration only needs these three
//! read-only facts at the moment an agent considers leaving its node.

/// Days per simulated year used for age conversion.
pub const DAYS_PER_YEAR: f64 = 365.0;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gender {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "MALE"))]
    Male,
    #[cfg_attr(feature = "serde", serde(rename = "FEMALE"))]
    Female,
}

impl Gender {
    /// Chunk index in gendered rate data: male first, then female.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Gender::Male   => 0,
            Gender::Female => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male   => "male",
            Gender::Female => "female",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Traveler ──────────────────────────────────────────────────────────────────

/// An agent that may migrate.
///
/// Implement this on the application's individual type.  Only `age_days` and
/// `gender` are required; the rate modifier defaults to 1.0 (no individual
/// heterogeneity).
pub trait Traveler {
    /// Current age in simulated days.
    fn age_days(&self) -> f64;

    fn gender(&self) -> Gender;

    /// Multiplier applied to the node's total migration rate for this agent.
    fn migration_rate_modifier(&self) -> f64 {
        1.0
    }

    #[inline]
    fn age_years(&self) -> f64 {
        self.age_days() / DAYS_PER_YEAR
    }
}

/// A plain-data [`Traveler`], handy for tests and tools.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TravelerProfile {
    pub age_days: f64,
    pub gender: Gender,
    pub migration_rate_modifier: f64,
}

impl TravelerProfile {
    pub fn new(age_days: f64, gender: Gender) -> Self {
        Self {
            age_days,
            gender,
            migration_rate_modifier: 1.0,
        }
    }

    pub fn from_years(age_years: f64, gender: Gender) -> Self {
        Self::new(age_years * DAYS_PER_YEAR, gender)
    }

    pub fn with_rate_modifier(mut self, modifier: f64) -> Self {
        self.migration_rate_modifier = modifier;
        self
    }
}

impl Traveler for TravelerProfile {
    #[inline]
    fn age_days(&self) -> f64 {
        self.age_days
    }

    #[inline]
    fn gender(&self) -> Gender {
        self.gender
    }

    #[inline]
    fn migration_rate_modifier(&self) -> f64 {
        self.migration_rate_modifier
    }
}
