//! `mig-rates`: rate tables, destination CDFs, and per-node migration info.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                     |
//! |------------------|--------------------------------------------------------------|
//! | [`rate_table`]   | `RateTable` (age → rate curve), `InterpolationType`          |
//! | [`distribution`] | `RateDistribution`: destinations, types, CDF, total rate    |
//! | [`info`]         | `MigrationInfo` (Null / FixedRate / AgeAndGender), `MigrationStep` |
//! | [`rate_data`]    | `RateData` alias, `merge_rate_data`                          |
//! | [`error`]        | `RatesError`, `RatesResult<T>`                               |
//!
//! # Sampling model (summary)
//!
//! For a traveler with effective total rate `r` (node total × individual
//! modifier):
//!
//! ```text
//! u ~ U[0, 1)
//! u >= r            → no migration this step
//! x = u / r         → destination i with CDF[i-1] <= x < CDF[i]
//! wait ~ Exp(r)     → time until departure
//! ```
//!
//! Destination `i` owns the half-open interval `[CDF[i-1], CDF[i])`, so a draw
//! exactly on a boundary selects the destination whose interval starts there.

pub mod distribution;
pub mod error;
pub mod info;
pub mod rate_data;
pub mod rate_table;

#[cfg(test)]
mod tests;

pub use distribution::RateDistribution;
pub use error::{RatesError, RatesResult};
pub use info::{AgeAndGenderInfo, FixedRateInfo, MigrationInfo, MigrationInfoKind, MigrationStep};
pub use rate_data::{RateData, merge_rate_data};
pub use rate_table::{InterpolationType, RateTable};
