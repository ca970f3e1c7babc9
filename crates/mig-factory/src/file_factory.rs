//! `FileMigrationInfoFactory`: migration info from per-type rate files.

use log::{info, warn};

use mig_core::{ExternalNodeId, MigrationType, NodeIdMap};
use mig_file::MigrationFileReader;
use mig_rates::{MigrationInfo, RateData, merge_rate_data};

use crate::{FactoryError, FactoryKind, FactoryResult, MigrationConfig, MigrationInfoFactory};

/// One [`MigrationFileReader`] per file-backed migration type.
///
/// Types without `Enable_<T>_Migration` and a filename get a disabled reader,
/// which contributes no data.
pub struct FileMigrationInfoFactory {
    readers:       Vec<MigrationFileReader>,
    heterogeneity: bool,
    initialized:   bool,
}

impl FileMigrationInfoFactory {
    pub fn new(config: &MigrationConfig) -> Self {
        let readers = MigrationType::FILE_TYPES
            .iter()
            .map(|&t| {
                let s = config.type_settings(t);
                if s.is_active() {
                    MigrationFileReader::new(
                        t,
                        t.max_destinations(),
                        true,
                        config.resolve(&s.filename),
                        s.x_modifier,
                    )
                } else {
                    MigrationFileReader::disabled(t)
                }
            })
            .collect();

        Self {
            readers,
            heterogeneity: config.enable_heterogeneity,
            initialized: false,
        }
    }

    /// Merged rate data for `node` across every enabled reader, and whether
    /// any reader's file is age- or gender-dependent.
    pub fn read_rate_data(
        &mut self,
        node:     ExternalNodeId,
        node_ids: &NodeIdMap,
    ) -> FactoryResult<(RateData, bool)> {
        if !self.initialized {
            return Err(FactoryError::NotInitialized);
        }
        let mut parts = Vec::with_capacity(self.readers.len());
        for reader in self.readers.iter_mut().filter(|r| r.is_enabled()) {
            parts.push(reader.read_data(node, node_ids)?);
        }
        let dependent = self.readers.iter().any(MigrationFileReader::is_age_and_gender_dependent);
        Ok((merge_rate_data(parts), dependent))
    }
}

impl MigrationInfoFactory for FileMigrationInfoFactory {
    fn kind(&self) -> FactoryKind {
        FactoryKind::File
    }

    fn initialize(&mut self, id_reference: &str) -> FactoryResult<()> {
        for reader in &mut self.readers {
            reader.initialize(id_reference)?;
        }
        self.initialized = true;

        let enabled: Vec<&str> = self
            .readers
            .iter()
            .filter(|r| r.is_enabled())
            .map(|r| r.migration_type().label())
            .collect();
        if enabled.is_empty() {
            info!("file migration: no migration types enabled");
        } else {
            info!("file migration: enabled types {}", enabled.join(", "));
        }
        Ok(())
    }

    fn create_migration_info(
        &mut self,
        node:     ExternalNodeId,
        node_ids: &NodeIdMap,
    ) -> FactoryResult<MigrationInfo> {
        let (rate_data, dependent) = self.read_rate_data(node, node_ids)?;
        Ok(MigrationInfo::build(rate_data, dependent, self.heterogeneity))
    }

    fn is_enabled(&self, migration_type: MigrationType) -> bool {
        self.readers
            .iter()
            .any(|r| r.migration_type() == migration_type && r.is_enabled())
    }

    fn is_at_least_one_type_configured_for_individuals(&self) -> bool {
        self.readers.iter().any(MigrationFileReader::is_enabled)
    }

    fn check_node_ids(&self, node_ids: &NodeIdMap) {
        for reader in &self.readers {
            let Some(meta) = reader.metadata() else { continue };
            if meta.node_count as usize != node_ids.len() {
                warn!(
                    "{} file {:?} describes {} nodes but the demographics have {}",
                    reader.migration_type(),
                    reader.path(),
                    meta.node_count,
                    node_ids.len(),
                );
            }
        }
    }
}
