//! Error types for mig-file.
//!
//! Every variant that concerns a file names it; size and field mismatches
//! carry both the expected and the found value.

use std::path::PathBuf;

use mig_core::{ExternalNodeId, MigrationType};
use mig_rates::RatesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse migration metadata {path:?}: {source}")]
    Metadata {
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path:?}: {field} expected {expected}, found {found}")]
    Invalid {
        path:     PathBuf,
        field:    &'static str,
        expected: String,
        found:    String,
    },

    #[error("{path:?}: file size mismatch, expected {expected} bytes but found {actual} bytes")]
    SizeMismatch {
        path:     PathBuf,
        expected: u64,
        actual:   u64,
    },

    #[error("{path:?}: node {node} references unknown destination {destination}")]
    UnknownDestination {
        path:        PathBuf,
        node:        ExternalNodeId,
        destination: ExternalNodeId,
    },

    #[error("{path:?}: node {node} slot {slot} names destination {first} in one age/gender chunk and {other} in another")]
    InconsistentDestination {
        path:  PathBuf,
        node:  ExternalNodeId,
        slot:  usize,
        first: ExternalNodeId,
        other: ExternalNodeId,
    },

    #[error("{path:?}: bad rate data for node {node}: {source}")]
    Rates {
        path:   PathBuf,
        node:   ExternalNodeId,
        #[source]
        source: RatesError,
    },

    #[error("cannot encode node {node}: {reason}")]
    Encode {
        node:   ExternalNodeId,
        reason: String,
    },

    #[error("{0} migration file read before initialize")]
    NotInitialized(MigrationType),
}

pub type FileResult<T> = Result<T, FileError>;
