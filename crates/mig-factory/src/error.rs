use std::path::PathBuf;

use mig_core::{CoreError, ExternalNodeId};
use mig_file::FileError;
use mig_rates::RatesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("migration configuration error: {0}")]
    Config(String),

    #[error("failed to parse migration configuration {path:?}: {source}")]
    Json {
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Rates(#[from] RatesError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("node {0} is not part of the {1}x{1} default geography")]
    NodeOutsideTorus(ExternalNodeId, u32),

    #[error("default geography: node {node} references unknown destination {destination}")]
    UnknownDestination {
        node:        ExternalNodeId,
        destination: ExternalNodeId,
    },

    #[error("migration factory used before initialize")]
    NotInitialized,
}

pub type FactoryResult<T> = Result<T, FactoryError>;
