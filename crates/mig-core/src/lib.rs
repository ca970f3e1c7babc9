//! `mig-core`: foundational types for the migration subsystem.
//!
//! This crate is a dependency of every other `mig-*` crate.  It has no
//! `mig-*` dependencies and only `rand`, `rand_distr` and `thiserror`
//! externally, plus optional `serde`.
//!
//! # What lives here
//!
//! | Module             | Contents                                              |
//! |--------------------|-------------------------------------------------------|
//! | [`ids`]            | `NodeId` (suid), `ExternalNodeId`, `NodeIdMap`        |
//! | [`migration_type`] | `MigrationType` tag enum                              |
//! | [`traveler`]       | `Gender`, `Traveler` trait, `TravelerProfile`         |
//! | [`sim_type`]       | `SimType` enum                                        |
//! | [`rng`]            | `NodeRng` (per-node), `SimRng` (global)               |
//! | [`error`]          | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to the public enums, using  |
//! |         | the simulation's configuration spellings.                  |

pub mod error;
pub mod ids;
pub mod migration_type;
pub mod rng;
pub mod sim_type;
pub mod traveler;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{ExternalNodeId, NodeId, NodeIdMap};
pub use migration_type::MigrationType;
pub use rng::{NodeRng, SimRng};
pub use sim_type::SimType;
pub use traveler::{DAYS_PER_YEAR, Gender, Traveler, TravelerProfile};
