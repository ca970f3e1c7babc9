//! The `MigrationInfoFactory` trait, which builds one `MigrationInfo` per node.

use std::fmt;

use mig_core::{ExternalNodeId, MigrationType, NodeIdMap};
use mig_rates::MigrationInfo;

use crate::FactoryResult;

/// Which concrete factory the selector produced.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum FactoryKind {
    /// Rate files, one reader per migration type.
    File,
    /// Synthetic N×N torus.
    Default,
    /// `File` plus a vector rate file.
    VectorFile,
    /// `Default` plus torus migration for vectors.
    VectorDefault,
}

impl fmt::Display for FactoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FactoryKind::File          => "file",
            FactoryKind::Default       => "default",
            FactoryKind::VectorFile    => "vector file",
            FactoryKind::VectorDefault => "vector default",
        };
        f.write_str(name)
    }
}

/// Source of per-node migration data for travelers.
///
/// # Lifecycle
///
/// The selector constructs a factory from configuration, then calls
/// [`initialize`][Self::initialize] once.  Node setup then calls
/// [`create_migration_info`][Self::create_migration_info] once per node, in
/// suid order.  The returned `MigrationInfo` is owned by the node.
pub trait MigrationInfoFactory {
    fn kind(&self) -> FactoryKind;

    /// Open and validate every configured data source.  `id_reference` is the
    /// demographics id space the data must match.
    fn initialize(&mut self, id_reference: &str) -> FactoryResult<()>;

    /// Build the migration info for `node`, resolving destinations through
    /// `node_ids`.
    fn create_migration_info(
        &mut self,
        node:     ExternalNodeId,
        node_ids: &NodeIdMap,
    ) -> FactoryResult<MigrationInfo>;

    /// `true` if `migration_type` contributes data.
    fn is_enabled(&self, migration_type: MigrationType) -> bool;

    /// `true` if any migration type is configured for human travelers.
    fn is_at_least_one_type_configured_for_individuals(&self) -> bool;

    /// Log anything about `node_ids` that looks inconsistent with the loaded
    /// data.  Never fails.
    ///
    /// Default: does nothing.
    fn check_node_ids(&self, _node_ids: &NodeIdMap) {}

    /// Vector-capable factories return themselves.
    ///
    /// Default: `None`.
    fn as_vector_mut(&mut self) -> Option<&mut dyn VectorMigrationInfoFactory> {
        None
    }
}

/// Factories that also provide gender- and age-independent migration for
/// vectors.
pub trait VectorMigrationInfoFactory: MigrationInfoFactory {
    fn create_vector_migration_info(
        &mut self,
        node:     ExternalNodeId,
        node_ids: &NodeIdMap,
    ) -> FactoryResult<MigrationInfo>;

    fn is_vector_migration_enabled(&self) -> bool;
}
