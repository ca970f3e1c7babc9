//! Strongly typed node identifiers and the external ↔ internal id map.
//!
//! Two id spaces exist side by side:
//!
//! - [`ExternalNodeId`]: the id used by demographics and migration files.
//!   `0` is reserved as the "unused slot" sentinel in binary rate files.
//! - [`NodeId`]: the simulation-internal suid, dense from `0`, suitable for
//!   direct `Vec` indexing.
//!
//! [`NodeIdMap`] is the bidirectional mapping between the two for the nodes
//! of the loaded demographics.

use std::collections::HashMap;
use std::fmt;

use crate::{CoreError, CoreResult};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" (`u32::MAX`).
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Simulation-internal node suid.  Dense from 0 in node-setup order.
    pub struct NodeId(u32);
}

typed_id! {
    /// Node id as written in demographics and migration files.
    pub struct ExternalNodeId(u32);
}

impl ExternalNodeId {
    /// Destination id marking an unused slot in a binary rate file.
    pub const UNUSED: ExternalNodeId = ExternalNodeId(0);

    #[inline]
    pub fn is_unused(self) -> bool {
        self == Self::UNUSED
    }
}

// ── NodeIdMap ─────────────────────────────────────────────────────────────────

/// Bidirectional external-id ↔ suid mapping for the loaded demographics.
///
/// Suids are handed out in insertion order, so `external_ids()[suid.index()]`
/// is always the external id of `suid`.
#[derive(Debug, Clone, Default)]
pub struct NodeIdMap {
    to_suid:     HashMap<ExternalNodeId, NodeId>,
    to_external: Vec<ExternalNodeId>,
}

impl NodeIdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map assigning suids `0..n` to `ids` in iteration order.
    pub fn from_external_ids<I>(ids: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = ExternalNodeId>,
    {
        let mut map = Self::new();
        for id in ids {
            map.insert(id)?;
        }
        Ok(map)
    }

    /// Register `external` and return its newly assigned suid.
    ///
    /// # Errors
    ///
    /// `DuplicateNode` if `external` is already present; `ReservedNodeId` for
    /// the unused-slot sentinel `0` or the `INVALID` sentinel.
    pub fn insert(&mut self, external: ExternalNodeId) -> CoreResult<NodeId> {
        if external.is_unused() || !external.is_valid() {
            return Err(CoreError::ReservedNodeId(external));
        }
        if self.to_suid.contains_key(&external) {
            return Err(CoreError::DuplicateNode(external));
        }
        let suid = match NodeId::try_from(self.to_external.len()) {
            Ok(suid) if suid.is_valid() => suid,
            _ => return Err(CoreError::SuidOverflow(NodeId(u32::MAX - 1))),
        };
        self.to_suid.insert(external, suid);
        self.to_external.push(external);
        Ok(suid)
    }

    #[inline]
    pub fn suid(&self, external: ExternalNodeId) -> Option<NodeId> {
        self.to_suid.get(&external).copied()
    }

    #[inline]
    pub fn external_id(&self, suid: NodeId) -> Option<ExternalNodeId> {
        self.to_external.get(suid.index()).copied()
    }

    #[inline]
    pub fn contains(&self, external: ExternalNodeId) -> bool {
        self.to_suid.contains_key(&external)
    }

    /// External ids indexed by suid.
    #[inline]
    pub fn external_ids(&self) -> &[ExternalNodeId] {
        &self.to_external
    }

    /// `(external, suid)` pairs in ascending suid order.
    pub fn iter(&self) -> impl Iterator<Item = (ExternalNodeId, NodeId)> + '_ {
        self.to_external
            .iter()
            .enumerate()
            .map(|(i, &ext)| (ext, NodeId(i as u32)))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.to_external.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.to_external.is_empty()
    }
}
