//! Migration-type tag shared across all migration crates.
//!
//! Every destination a node can send travelers to is tagged with the mode of
//! travel that produced it.  The same destination may appear once per type.

use std::str::FromStr;

use crate::CoreError;

/// The category of travel for one reachable destination.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MigrationType {
    /// Not migrating (default state).
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "NO_MIGRATION"))]
    None,
    #[cfg_attr(feature = "serde", serde(rename = "LOCAL_MIGRATION"))]
    Local,
    #[cfg_attr(feature = "serde", serde(rename = "AIR_MIGRATION"))]
    Air,
    #[cfg_attr(feature = "serde", serde(rename = "REGIONAL_MIGRATION"))]
    Regional,
    #[cfg_attr(feature = "serde", serde(rename = "SEA_MIGRATION"))]
    Sea,
    #[cfg_attr(feature = "serde", serde(rename = "FAMILY_MIGRATION"))]
    Family,
    /// Travel ordered by an intervention rather than a rate file.
    #[cfg_attr(feature = "serde", serde(rename = "INTERVENTION_MIGRATION"))]
    Intervention,
}

impl MigrationType {
    /// The file-backed types, in the order readers are constructed.
    pub const FILE_TYPES: [MigrationType; 5] = [
        MigrationType::Local,
        MigrationType::Air,
        MigrationType::Regional,
        MigrationType::Sea,
        MigrationType::Family,
    ];

    /// `true` for every tag except `None`.
    #[inline]
    pub fn is_migration(self) -> bool {
        !matches!(self, MigrationType::None)
    }

    /// Upper bound on destinations per node in a rate file of this type.
    pub fn max_destinations(self) -> usize {
        match self {
            MigrationType::Local        => 8,
            MigrationType::Air          => 60,
            MigrationType::Regional     => 30,
            MigrationType::Sea          => 5,
            MigrationType::Family       => 8,
            MigrationType::None
            | MigrationType::Intervention => 0,
        }
    }

    /// Configuration spelling, e.g. `"LOCAL_MIGRATION"`.
    pub fn as_str(self) -> &'static str {
        match self {
            MigrationType::None         => "NO_MIGRATION",
            MigrationType::Local        => "LOCAL_MIGRATION",
            MigrationType::Air          => "AIR_MIGRATION",
            MigrationType::Regional     => "REGIONAL_MIGRATION",
            MigrationType::Sea          => "SEA_MIGRATION",
            MigrationType::Family       => "FAMILY_MIGRATION",
            MigrationType::Intervention => "INTERVENTION_MIGRATION",
        }
    }

    /// Short label used in configuration key names (`Enable_Local_Migration`).
    pub fn label(self) -> &'static str {
        match self {
            MigrationType::None         => "No",
            MigrationType::Local        => "Local",
            MigrationType::Air          => "Air",
            MigrationType::Regional     => "Regional",
            MigrationType::Sea          => "Sea",
            MigrationType::Family       => "Family",
            MigrationType::Intervention => "Intervention",
        }
    }
}

impl FromStr for MigrationType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            MigrationType::None,
            MigrationType::Local,
            MigrationType::Air,
            MigrationType::Regional,
            MigrationType::Sea,
            MigrationType::Family,
            MigrationType::Intervention,
        ]
        .into_iter()
        .find(|t| t.as_str() == s.trim())
        .ok_or_else(|| CoreError::UnknownMigrationType(s.to_string()))
    }
}

impl std::fmt::Display for MigrationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
