//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::{ExternalNodeId, NodeId};

/// Errors produced by `mig-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("external node id {0} appears more than once in the node map")]
    DuplicateNode(ExternalNodeId),

    #[error("external node id {0} is reserved for unused destination slots")]
    ReservedNodeId(ExternalNodeId),

    #[error("too many nodes for the suid space (last suid {0})")]
    SuidOverflow(NodeId),

    #[error("unknown migration type {0:?}")]
    UnknownMigrationType(String),

    #[error("unknown simulation type {0:?}")]
    UnknownSimType(String),
}

/// Shorthand result type for `mig-core`.
pub type CoreResult<T> = Result<T, CoreError>;
