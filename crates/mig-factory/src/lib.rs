//! `mig-factory`: turning configuration into per-node migration info.
//!
//! # Crate layout
//!
//! | Module              | Contents                                                      |
//! |---------------------|---------------------------------------------------------------|
//! | [`config`]          | `MigrationConfig`, `MigrationModel`, `TypeSettings`           |
//! | [`factory`]         | `MigrationInfoFactory` / `VectorMigrationInfoFactory` traits   |
//! | [`file_factory`]    | `FileMigrationInfoFactory`: one rate file per migration type  |
//! | [`default_factory`] | `DefaultMigrationInfoFactory`: synthetic N×N torus            |
//! | [`vector`]          | File and torus factories with vector migration                 |
//! | [`selector`]        | Simulation type × default flag → initialized factory           |
//! | [`setup`]           | `NodeMigration`, `setup_nodes`                                 |
//! | [`error`]           | `FactoryError`, `FactoryResult<T>`                            |
//!
//! # Example
//!
//! ```rust,ignore
//! let config = MigrationConfig::from_json_file(Path::new("config.json"))?;
//! let mut factory = construct_migration_info_factory(&config, "Gridded world grump2.5arcmin")?;
//! let mut nodes = setup_nodes(factory.as_mut(), &node_ids, seed)?;
//!
//! if let Some(step) = nodes[0].pick_migration_step(&traveler) {
//!     // schedule departure to step.destination after step.wait_time days
//! }
//! ```

pub mod config;
pub mod default_factory;
pub mod error;
pub mod factory;
pub mod file_factory;
pub mod selector;
pub mod setup;
pub mod vector;


pub use config::{MigrationConfig, MigrationModel, TypeSettings};
pub use default_factory::DefaultMigrationInfoFactory;
pub use error::{FactoryError, FactoryResult};
pub use factory::{FactoryKind, MigrationInfoFactory, VectorMigrationInfoFactory};
pub use file_factory::FileMigrationInfoFactory;
pub use selector::{construct_migration_info_factory, select_factory_kind};
pub use setup::{NodeMigration, setup_nodes};
pub use vector::{VECTOR_MAX_DESTINATIONS, VectorDefaultMigrationInfoFactory, VectorFileMigrationInfoFactory};
