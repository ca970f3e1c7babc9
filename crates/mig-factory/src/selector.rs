//! Choosing and initializing the factory for a run.
//!
//! | Simulation type                        | `Use_Default_Migration` | Factory         |
//! |----------------------------------------|-------------------------|-----------------|
//! | `VECTOR_SIM`, `MALARIA_SIM`, `DENGUE_SIM` | true                 | `VectorDefault` |
//! | `VECTOR_SIM`, `MALARIA_SIM`, `DENGUE_SIM` | false                | `VectorFile`    |
//! | anything else                          | true                    | `Default`       |
//! | anything else                          | false                   | `File`          |

use log::info;

use mig_core::SimType;

use crate::{
    DefaultMigrationInfoFactory, FactoryKind, FactoryResult, FileMigrationInfoFactory, MigrationConfig,
    MigrationInfoFactory, VectorDefaultMigrationInfoFactory, VectorFileMigrationInfoFactory,
};

pub fn select_factory_kind(sim_type: SimType, use_default_migration: bool) -> FactoryKind {
    match (sim_type.is_vector_based(), use_default_migration) {
        (true, true)   => FactoryKind::VectorDefault,
        (true, false)  => FactoryKind::VectorFile,
        (false, true)  => FactoryKind::Default,
        (false, false) => FactoryKind::File,
    }
}

/// Build the factory `config` calls for and initialize it against
/// `id_reference`.
///
/// Every call returns a new, independent factory.
pub fn construct_migration_info_factory(
    config:       &MigrationConfig,
    id_reference: &str,
) -> FactoryResult<Box<dyn MigrationInfoFactory>> {
    config.validate()?;

    let kind = select_factory_kind(config.sim_type, config.use_default_migration);
    let mut factory: Box<dyn MigrationInfoFactory> = match kind {
        FactoryKind::File          => Box::new(FileMigrationInfoFactory::new(config)),
        FactoryKind::Default       => Box::new(DefaultMigrationInfoFactory::from_config(config)?),
        FactoryKind::VectorFile    => Box::new(VectorFileMigrationInfoFactory::new(config)),
        FactoryKind::VectorDefault => Box::new(VectorDefaultMigrationInfoFactory::from_config(config)?),
    };

    info!("{} selected {kind} migration factory", config.sim_type);
    factory.initialize(id_reference)?;
    Ok(factory)
}
