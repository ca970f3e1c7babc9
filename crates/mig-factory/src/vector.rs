//! Factories for vector-borne simulations: human migration as usual, plus a
//! gender- and age-independent `MigrationInfo` for vectors.
//!
//! Vector migration is always tagged `LOCAL_MIGRATION` and ignores traveler
//! rate modifiers.

use log::info;

use mig_core::{ExternalNodeId, MigrationType, NodeIdMap};
use mig_file::MigrationFileReader;
use mig_rates::MigrationInfo;

use crate::{
    DefaultMigrationInfoFactory, FactoryError, FactoryKind, FactoryResult, FileMigrationInfoFactory,
    MigrationConfig, MigrationInfoFactory, VectorMigrationInfoFactory,
};

/// Destination slots allowed in a vector rate file.
pub const VECTOR_MAX_DESTINATIONS: usize = 8;

// ── VectorFileMigrationInfoFactory ────────────────────────────────────────────

pub struct VectorFileMigrationInfoFactory {
    human:  FileMigrationInfoFactory,
    vector: MigrationFileReader,
}

impl VectorFileMigrationInfoFactory {
    pub fn new(config: &MigrationConfig) -> Self {
        let s = config.vector_settings();
        let vector = if s.is_active() {
            MigrationFileReader::new(
                MigrationType::Local,
                VECTOR_MAX_DESTINATIONS,
                true,
                config.resolve(&s.filename),
                s.x_modifier,
            )
        } else {
            MigrationFileReader::disabled(MigrationType::Local)
        };
        Self {
            human: FileMigrationInfoFactory::new(config),
            vector,
        }
    }
}

impl MigrationInfoFactory for VectorFileMigrationInfoFactory {
    fn kind(&self) -> FactoryKind {
        FactoryKind::VectorFile
    }

    fn initialize(&mut self, id_reference: &str) -> FactoryResult<()> {
        self.human.initialize(id_reference)?;
        self.vector.initialize(id_reference)?;

        if let Some(meta) = self.vector.metadata() {
            if meta.is_age_or_gender_dependent() {
                return Err(FactoryError::Config(format!(
                    "vector migration file {:?} must be SAME_FOR_BOTH_GENDERS without age dependence",
                    self.vector.path()
                )));
            }
            info!("vector migration: {:?}", self.vector.path());
        }
        Ok(())
    }

    fn create_migration_info(
        &mut self,
        node:     ExternalNodeId,
        node_ids: &NodeIdMap,
    ) -> FactoryResult<MigrationInfo> {
        self.human.create_migration_info(node, node_ids)
    }

    fn is_enabled(&self, migration_type: MigrationType) -> bool {
        self.human.is_enabled(migration_type)
    }

    fn is_at_least_one_type_configured_for_individuals(&self) -> bool {
        self.human.is_at_least_one_type_configured_for_individuals()
    }

    fn check_node_ids(&self, node_ids: &NodeIdMap) {
        self.human.check_node_ids(node_ids);
    }

    fn as_vector_mut(&mut self) -> Option<&mut dyn VectorMigrationInfoFactory> {
        Some(self)
    }
}

impl VectorMigrationInfoFactory for VectorFileMigrationInfoFactory {
    fn create_vector_migration_info(
        &mut self,
        node:     ExternalNodeId,
        node_ids: &NodeIdMap,
    ) -> FactoryResult<MigrationInfo> {
        let rate_data = self.vector.read_data(node, node_ids)?;
        Ok(MigrationInfo::build(rate_data, false, false))
    }

    fn is_vector_migration_enabled(&self) -> bool {
        self.vector.is_enabled()
    }
}

// ── VectorDefaultMigrationInfoFactory ─────────────────────────────────────────

pub struct VectorDefaultMigrationInfoFactory {
    human:       DefaultMigrationInfoFactory,
    vector_rate: f64,
    vector_on:   bool,
}

impl VectorDefaultMigrationInfoFactory {
    /// Vectors move to the torus neighbours at
    /// `Default_Local_Migration_Rate × x_Vector_Migration`.
    pub fn from_config(config: &MigrationConfig) -> FactoryResult<Self> {
        let s = config.vector_settings();
        Ok(Self {
            human:       DefaultMigrationInfoFactory::from_config(config)?,
            vector_rate: config.default_local_rate * s.x_modifier,
            vector_on:   s.enabled,
        })
    }
}

impl MigrationInfoFactory for VectorDefaultMigrationInfoFactory {
    fn kind(&self) -> FactoryKind {
        FactoryKind::VectorDefault
    }

    fn initialize(&mut self, id_reference: &str) -> FactoryResult<()> {
        self.human.initialize(id_reference)?;
        if self.vector_on {
            info!("vector migration: torus, rate {} per neighbour", self.vector_rate);
        }
        Ok(())
    }

    fn create_migration_info(
        &mut self,
        node:     ExternalNodeId,
        node_ids: &NodeIdMap,
    ) -> FactoryResult<MigrationInfo> {
        self.human.create_migration_info(node, node_ids)
    }

    fn is_enabled(&self, migration_type: MigrationType) -> bool {
        self.human.is_enabled(migration_type)
    }

    fn is_at_least_one_type_configured_for_individuals(&self) -> bool {
        self.human.is_at_least_one_type_configured_for_individuals()
    }

    fn check_node_ids(&self, node_ids: &NodeIdMap) {
        self.human.check_node_ids(node_ids);
    }

    fn as_vector_mut(&mut self) -> Option<&mut dyn VectorMigrationInfoFactory> {
        Some(self)
    }
}

impl VectorMigrationInfoFactory for VectorDefaultMigrationInfoFactory {
    fn create_vector_migration_info(
        &mut self,
        node:     ExternalNodeId,
        node_ids: &NodeIdMap,
    ) -> FactoryResult<MigrationInfo> {
        if !self.vector_on {
            return Ok(MigrationInfo::Null);
        }
        let rate_data = self.human.torus_rate_data(node, node_ids, self.vector_rate)?;
        Ok(MigrationInfo::build(rate_data, false, false))
    }

    fn is_vector_migration_enabled(&self) -> bool {
        self.vector_on
    }
}
