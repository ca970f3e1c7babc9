//! Write the synthetic torus as a `Local_Migration.bin` rate file pair.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use mig_core::{ExternalNodeId, MigrationType, NodeIdMap};
use mig_factory::DefaultMigrationInfoFactory;
use mig_file::{GenderDataType, MigrationFileWriter, MigrationMetadata};
use mig_rates::InterpolationType;

pub const LOCAL_FILENAME: &str = "Local_Migration.bin";

/// Export every node's torus neighbours and return the binary path.
pub fn export_torus(
    torus:        &DefaultMigrationInfoFactory,
    node_ids:     &NodeIdMap,
    id_reference: &str,
    dir:          &Path,
) -> Result<PathBuf> {
    let metadata = MigrationMetadata {
        id_reference:       id_reference.to_string(),
        node_count:         node_ids.len() as u32,
        datavalue_count:    MigrationType::Local.max_destinations() as u32,
        ages_years:         Vec::new(),
        gender_data_type:   GenderDataType::SameForBothGenders,
        interpolation_type: InterpolationType::PiecewiseConstant,
        migration_type:     Some(MigrationType::Local),
    };
    let mut writer = MigrationFileWriter::new(metadata);

    for (node, _) in node_ids.iter() {
        let rate_data = torus.get_rate_data(node, node_ids)?;
        let chunk: Vec<(ExternalNodeId, f32)> = rate_data
            .first()
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter_map(|t| {
                let dest = node_ids.external_id(t.destination())?;
                Some((dest, t.get_rate(0.0) as f32))
            })
            .collect();
        writer.add_node(node, &[chunk])?;
    }

    std::fs::create_dir_all(dir).with_context(|| format!("creating {dir:?}"))?;
    let path = dir.join(LOCAL_FILENAME);
    writer.write(&path)?;
    info!("exported {} nodes to {path:?}", writer.node_count());
    Ok(path)
}
