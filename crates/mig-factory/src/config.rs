//! `MigrationConfig`: the migration section of a simulation configuration.
//!
//! Keys follow the simulation's configuration file:
//!
//! ```json
//! {
//!   "Simulation_Type": "GENERIC_SIM",
//!   "Migration_Model": "FIXED_RATE_MIGRATION",
//!   "Use_Default_Migration": false,
//!   "Input_Dir": "input",
//!   "Enable_Local_Migration": true,
//!   "Local_Migration_Filename": "Local_Migration.bin",
//!   "x_Local_Migration": 1.0
//! }
//! ```
//!
//! Every key is optional.  Filenames are resolved against `Input_Dir`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use mig_core::{MigrationType, SimType};

use crate::{FactoryError, FactoryResult};

/// Smallest torus for which the four neighbours of a node are distinct.
pub const MIN_TORUS_SIZE: u32 = 3;

/// Whether migration is simulated at all.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum MigrationModel {
    #[serde(rename = "NO_MIGRATION")]
    NoMigration,
    #[default]
    #[serde(rename = "FIXED_RATE_MIGRATION")]
    FixedRate,
}

/// Enablement, file and scale for one migration type.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeSettings {
    pub enabled:    bool,
    pub filename:   String,
    pub x_modifier: f64,
}

impl TypeSettings {
    /// Enabled and actually pointing at a file.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.enabled && !self.filename.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MigrationConfig {
    #[serde(rename = "Simulation_Type", default)]
    pub sim_type: SimType,

    /// Honour per-traveler rate modifiers.
    #[serde(rename = "Enable_Migration_Heterogeneity", default = "default_true")]
    pub enable_heterogeneity: bool,

    #[serde(rename = "Migration_Model", default)]
    pub migration_model: MigrationModel,

    /// Build a synthetic torus instead of reading rate files.
    #[serde(rename = "Use_Default_Migration", default)]
    pub use_default_migration: bool,

    #[serde(rename = "Default_Geography_Torus_Size", default = "default_torus_size")]
    pub torus_size: u32,

    /// Rate to each torus neighbour, in trips per day.
    #[serde(rename = "Default_Local_Migration_Rate", default = "default_local_rate")]
    pub default_local_rate: f64,

    #[serde(rename = "Input_Dir", default = "default_input_dir")]
    pub input_dir: PathBuf,

    // ── Per-type keys ─────────────────────────────────────────────────────────
    #[serde(rename = "Enable_Local_Migration", default)]
    pub enable_local: bool,
    #[serde(rename = "Local_Migration_Filename", default)]
    pub local_filename: String,
    #[serde(rename = "x_Local_Migration", default = "default_one")]
    pub x_local: f64,

    #[serde(rename = "Enable_Air_Migration", default)]
    pub enable_air: bool,
    #[serde(rename = "Air_Migration_Filename", default)]
    pub air_filename: String,
    #[serde(rename = "x_Air_Migration", default = "default_one")]
    pub x_air: f64,

    #[serde(rename = "Enable_Regional_Migration", default)]
    pub enable_regional: bool,
    #[serde(rename = "Regional_Migration_Filename", default)]
    pub regional_filename: String,
    #[serde(rename = "x_Regional_Migration", default = "default_one")]
    pub x_regional: f64,

    #[serde(rename = "Enable_Sea_Migration", default)]
    pub enable_sea: bool,
    #[serde(rename = "Sea_Migration_Filename", default)]
    pub sea_filename: String,
    #[serde(rename = "x_Sea_Migration", default = "default_one")]
    pub x_sea: f64,

    #[serde(rename = "Enable_Family_Migration", default)]
    pub enable_family: bool,
    #[serde(rename = "Family_Migration_Filename", default)]
    pub family_filename: String,
    #[serde(rename = "x_Family_Migration", default = "default_one")]
    pub x_family: f64,

    #[serde(rename = "Enable_Vector_Migration", default)]
    pub enable_vector: bool,
    #[serde(rename = "Vector_Migration_Filename", default)]
    pub vector_filename: String,
    #[serde(rename = "x_Vector_Migration", default = "default_one")]
    pub x_vector: f64,
}

fn default_true() -> bool {
    true
}

fn default_one() -> f64 {
    1.0
}

fn default_torus_size() -> u32 {
    10
}

fn default_local_rate() -> f64 {
    0.1
}

fn default_input_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            sim_type:              SimType::default(),
            enable_heterogeneity:  true,
            migration_model:       MigrationModel::default(),
            use_default_migration: false,
            torus_size:            default_torus_size(),
            default_local_rate:    default_local_rate(),
            input_dir:             default_input_dir(),
            enable_local:          false,
            local_filename:        String::new(),
            x_local:               1.0,
            enable_air:            false,
            air_filename:          String::new(),
            x_air:                 1.0,
            enable_regional:       false,
            regional_filename:     String::new(),
            x_regional:            1.0,
            enable_sea:            false,
            sea_filename:          String::new(),
            x_sea:                 1.0,
            enable_family:         false,
            family_filename:       String::new(),
            x_family:              1.0,
            enable_vector:         false,
            vector_filename:       String::new(),
            x_vector:              1.0,
        }
    }
}

impl MigrationConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> FactoryResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|source| FactoryError::Json {
            path: PathBuf::from("<string>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_json_file(path: &Path) -> FactoryResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| FactoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| FactoryError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges and that every enabled file type names a file.
    pub fn validate(&self) -> FactoryResult<()> {
        if self.use_default_migration && self.torus_size < MIN_TORUS_SIZE {
            return Err(FactoryError::Config(format!(
                "Default_Geography_Torus_Size must be at least {MIN_TORUS_SIZE}, got {}",
                self.torus_size
            )));
        }
        check_rate("Default_Local_Migration_Rate", self.default_local_rate)?;

        let files_used = !self.use_default_migration && self.migration_enabled();
        let file_types = MigrationType::FILE_TYPES
            .iter()
            .map(|&t| (t.label(), self.raw_settings(t)));
        let all = file_types.chain(std::iter::once(("Vector", self.raw_vector_settings())));

        for (label, s) in all {
            check_rate(&format!("x_{label}_Migration"), s.x_modifier)?;
            if files_used && s.enabled && s.filename.trim().is_empty() {
                return Err(FactoryError::Config(format!(
                    "Enable_{label}_Migration is set but {label}_Migration_Filename is empty"
                )));
            }
        }
        Ok(())
    }

    /// `false` when `Migration_Model` is `NO_MIGRATION`.
    #[inline]
    pub fn migration_enabled(&self) -> bool {
        self.migration_model != MigrationModel::NoMigration
    }

    /// Effective settings for a file-backed type.  Every type is disabled
    /// under `NO_MIGRATION`.
    pub fn type_settings(&self, migration_type: MigrationType) -> TypeSettings {
        let mut s = self.raw_settings(migration_type);
        s.enabled &= self.migration_enabled();
        s
    }

    /// Effective settings for vector migration.
    pub fn vector_settings(&self) -> TypeSettings {
        let mut s = self.raw_vector_settings();
        s.enabled &= self.migration_enabled();
        s
    }

    /// `Input_Dir` joined with `filename`.
    pub fn resolve(&self, filename: &str) -> PathBuf {
        self.input_dir.join(filename)
    }

    fn raw_settings(&self, migration_type: MigrationType) -> TypeSettings {
        let (enabled, filename, x_modifier) = match migration_type {
            MigrationType::Local    => (self.enable_local, self.local_filename.as_str(), self.x_local),
            MigrationType::Air      => (self.enable_air, self.air_filename.as_str(), self.x_air),
            MigrationType::Regional => (self.enable_regional, self.regional_filename.as_str(), self.x_regional),
            MigrationType::Sea      => (self.enable_sea, self.sea_filename.as_str(), self.x_sea),
            MigrationType::Family   => (self.enable_family, self.family_filename.as_str(), self.x_family),
            MigrationType::None | MigrationType::Intervention => (false, "", 1.0),
        };
        TypeSettings {
            enabled,
            filename: filename.to_string(),
            x_modifier,
        }
    }

    fn raw_vector_settings(&self) -> TypeSettings {
        TypeSettings {
            enabled:    self.enable_vector,
            filename:   self.vector_filename.clone(),
            x_modifier: self.x_vector,
        }
    }
}

fn check_rate(key: &str, value: f64) -> FactoryResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FactoryError::Config(format!(
            "{key} must be a finite non-negative number, got {value}"
        )))
    }
}
