//! `DefaultMigrationInfoFactory`: a synthetic N×N torus, no file I/O.
//!
//! # Geography
//!
//! External ids run `1..=N²` in row-major order: node `id` sits at
//!
//!   row = (id - 1) / N,  col = (id - 1) % N
//!
//! Each node has exactly four neighbours (north, south, west, east), with
//! edges wrapping around.  Every neighbour gets the same local rate.

use log::{info, warn};

use mig_core::{ExternalNodeId, MigrationType, NodeIdMap};
use mig_rates::{MigrationInfo, RateData, RateTable};

use crate::config::MIN_TORUS_SIZE;
use crate::{FactoryError, FactoryKind, FactoryResult, MigrationConfig, MigrationInfoFactory};

pub struct DefaultMigrationInfoFactory {
    torus_size:    u32,
    local_rate:    f64,
    enabled:       bool,
    heterogeneity: bool,
}

impl DefaultMigrationInfoFactory {
    /// `local_rate` is the per-neighbour rate after any modifier.
    pub fn new(torus_size: u32, local_rate: f64, enabled: bool, heterogeneity: bool) -> FactoryResult<Self> {
        if torus_size < MIN_TORUS_SIZE {
            return Err(FactoryError::Config(format!(
                "torus size must be at least {MIN_TORUS_SIZE}, got {torus_size}"
            )));
        }
        if torus_size.checked_mul(torus_size).is_none_or(|n| n == u32::MAX) {
            return Err(FactoryError::Config(format!("torus size {torus_size} is too large")));
        }
        Ok(Self {
            torus_size,
            local_rate,
            enabled,
            heterogeneity,
        })
    }

    /// Rate `Default_Local_Migration_Rate × x_Local_Migration`, enabled unless
    /// `Migration_Model` is `NO_MIGRATION`.
    pub fn from_config(config: &MigrationConfig) -> FactoryResult<Self> {
        Self::new(
            config.torus_size,
            config.default_local_rate * config.x_local,
            config.migration_enabled(),
            config.enable_heterogeneity,
        )
    }

    #[inline]
    pub fn torus_size(&self) -> u32 {
        self.torus_size
    }

    #[inline]
    pub fn node_count(&self) -> u32 {
        self.torus_size * self.torus_size
    }

    #[inline]
    pub fn local_rate(&self) -> f64 {
        self.local_rate
    }

    /// The id map of the synthetic geography: external ids `1..=N²`, suids
    /// in the same order.
    pub fn node_id_map(&self) -> FactoryResult<NodeIdMap> {
        Ok(NodeIdMap::from_external_ids((1..=self.node_count()).map(ExternalNodeId))?)
    }

    /// The four wrap-around neighbours of `node`: north, south, west, east.
    pub fn neighbors(&self, node: ExternalNodeId) -> FactoryResult<[ExternalNodeId; 4]> {
        let n = self.torus_size;
        if node.0 == 0 || node.0 > self.node_count() {
            return Err(FactoryError::NodeOutsideTorus(node, n));
        }
        let index = node.0 - 1;
        let (row, col) = (index / n, index % n);
        let at = |r: u32, c: u32| ExternalNodeId(r * n + c + 1);

        Ok([
            at((row + n - 1) % n, col),
            at((row + 1) % n, col),
            at(row, (col + n - 1) % n),
            at(row, (col + 1) % n),
        ])
    }

    /// Rate data with one constant `LOCAL_MIGRATION` table per neighbour.
    pub fn get_rate_data(&self, node: ExternalNodeId, node_ids: &NodeIdMap) -> FactoryResult<RateData> {
        self.torus_rate_data(node, node_ids, self.local_rate)
    }

    pub(crate) fn torus_rate_data(
        &self,
        node:     ExternalNodeId,
        node_ids: &NodeIdMap,
        rate:     f64,
    ) -> FactoryResult<RateData> {
        let tables = self
            .neighbors(node)?
            .into_iter()
            .map(|dest| {
                let suid = node_ids
                    .suid(dest)
                    .ok_or(FactoryError::UnknownDestination { node, destination: dest })?;
                Ok(RateTable::constant(suid, MigrationType::Local, rate)?)
            })
            .collect::<FactoryResult<Vec<_>>>()?;
        Ok(vec![tables])
    }
}

impl MigrationInfoFactory for DefaultMigrationInfoFactory {
    fn kind(&self) -> FactoryKind {
        FactoryKind::Default
    }

    /// No data sources to open; the id reference is not checked.
    fn initialize(&mut self, _id_reference: &str) -> FactoryResult<()> {
        info!(
            "default migration: {n}x{n} torus, local rate {} per neighbour{}",
            self.local_rate,
            if self.enabled { "" } else { " (disabled)" },
            n = self.torus_size,
        );
        Ok(())
    }

    fn create_migration_info(
        &mut self,
        node:     ExternalNodeId,
        node_ids: &NodeIdMap,
    ) -> FactoryResult<MigrationInfo> {
        if !self.enabled {
            return Ok(MigrationInfo::Null);
        }
        let rate_data = self.get_rate_data(node, node_ids)?;
        Ok(MigrationInfo::build(rate_data, false, self.heterogeneity))
    }

    fn is_enabled(&self, migration_type: MigrationType) -> bool {
        self.enabled && migration_type == MigrationType::Local
    }

    fn is_at_least_one_type_configured_for_individuals(&self) -> bool {
        self.enabled
    }

    fn check_node_ids(&self, node_ids: &NodeIdMap) {
        if node_ids.len() != self.node_count() as usize {
            warn!(
                "default geography has {} nodes but the demographics have {}",
                self.node_count(),
                node_ids.len(),
            );
        }
    }
}
