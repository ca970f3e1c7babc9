//! Per-node migration state and the node-setup pass that creates it.

use log::{debug, info};

use mig_core::{ExternalNodeId, NodeId, NodeIdMap, NodeRng, Traveler};
use mig_rates::{MigrationInfo, MigrationInfoKind, MigrationStep};

use crate::{FactoryResult, MigrationInfoFactory};

/// Everything one node needs to answer migration queries.
pub struct NodeMigration {
    pub external_id: ExternalNodeId,
    pub suid:        NodeId,
    pub human:       MigrationInfo,
    /// `Some` only for vector factories.
    pub vector:      Option<MigrationInfo>,
    rng:             NodeRng,
}

impl NodeMigration {
    pub fn new(
        external_id: ExternalNodeId,
        suid:        NodeId,
        human:       MigrationInfo,
        vector:      Option<MigrationInfo>,
        rng:         NodeRng,
    ) -> Self {
        Self { external_id, suid, human, vector, rng }
    }

    /// One timestep's migration decision for a human traveler in this node.
    pub fn pick_migration_step<T: Traveler + ?Sized>(&mut self, traveler: &T) -> Option<MigrationStep> {
        self.human.pick_migration_step(&mut self.rng, traveler)
    }

    /// One timestep's migration decision for a vector in this node.
    pub fn pick_vector_migration_step<T: Traveler + ?Sized>(&mut self, traveler: &T) -> Option<MigrationStep> {
        self.vector.as_mut()?.pick_migration_step(&mut self.rng, traveler)
    }
}

/// Ask `factory` for every node in `node_ids`, in ascending suid order.
///
/// Each node's RNG is seeded from `seed` and its suid, so results do not
/// depend on which other nodes exist.
pub fn setup_nodes(
    factory:  &mut dyn MigrationInfoFactory,
    node_ids: &NodeIdMap,
    seed:     u64,
) -> FactoryResult<Vec<NodeMigration>> {
    factory.check_node_ids(node_ids);

    let mut nodes = Vec::with_capacity(node_ids.len());
    let mut counts = [0usize; 3];
    for (external_id, suid) in node_ids.iter() {
        let human = factory.create_migration_info(external_id, node_ids)?;
        let vector = match factory.as_vector_mut() {
            Some(v) => Some(v.create_vector_migration_info(external_id, node_ids)?),
            None => None,
        };

        let slot = match human.kind() {
            MigrationInfoKind::Null         => 0,
            MigrationInfoKind::FixedRate    => 1,
            MigrationInfoKind::AgeAndGender => 2,
        };
        counts[slot] += 1;
        debug!("{external_id} ({suid}): {:?}, total rate {}", human.kind(), human.total_rate());

        nodes.push(NodeMigration::new(external_id, suid, human, vector, NodeRng::new(seed, suid)));
    }

    info!(
        "{} migration: {} nodes ({} null, {} fixed-rate, {} age/gender)",
        factory.kind(),
        nodes.len(),
        counts[0],
        counts[1],
        counts[2],
    );
    Ok(nodes)
}
