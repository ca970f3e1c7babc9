//! The JSON metadata file that accompanies every binary rate file.
//!
//! # Format
//!
//! ```json
//! {
//!   "Metadata": {
//!     "IdReference": "Gridded world grump2.5arcmin",
//!     "NodeCount": 3,
//!     "DatavalueCount": 8,
//!     "AgesYears": [0, 15, 60],
//!     "GenderDataType": "ONE_FOR_EACH_GENDER",
//!     "InterpolationType": "LINEAR_INTERPOLATION",
//!     "MigrationType": "LOCAL_MIGRATION"
//!   },
//!   "NodeOffsets": "000000010000001000000002000001900000000300000310"
//! }
//! ```
//!
//! `NodeOffsets` packs 16 hex digits per node: 8 for the external node id,
//! 8 for the byte offset of that node's block in the binary file.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use mig_core::{ExternalNodeId, MigrationType};
use mig_rates::InterpolationType;

use crate::{FileError, FileResult, HEADER_SIZE, RECORD_SIZE};

/// Hex digits per `NodeOffsets` entry.
const OFFSET_ENTRY_LEN: usize = 16;

/// How many gender chunks each node block carries.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum GenderDataType {
    /// One chunk, used for both genders.
    #[default]
    #[serde(rename = "SAME_FOR_BOTH_GENDERS")]
    SameForBothGenders,
    /// Two chunks: male, then female.
    #[serde(rename = "ONE_FOR_EACH_GENDER")]
    OneForEachGender,
}

impl GenderDataType {
    #[inline]
    pub fn chunks(self) -> usize {
        match self {
            GenderDataType::SameForBothGenders => 1,
            GenderDataType::OneForEachGender   => 2,
        }
    }
}

/// The `"Metadata"` object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MigrationMetadata {
    #[serde(rename = "IdReference")]
    pub id_reference: String,

    #[serde(rename = "NodeCount")]
    pub node_count: u32,

    /// Destination slots per node (per gender/age chunk).
    #[serde(rename = "DatavalueCount")]
    pub datavalue_count: u32,

    /// Age breakpoints; empty means the rates do not depend on age.
    #[serde(rename = "AgesYears", default)]
    pub ages_years: Vec<f64>,

    #[serde(rename = "GenderDataType", default)]
    pub gender_data_type: GenderDataType,

    #[serde(rename = "InterpolationType", default)]
    pub interpolation_type: InterpolationType,

    #[serde(rename = "MigrationType", default, skip_serializing_if = "Option::is_none")]
    pub migration_type: Option<MigrationType>,
}

/// Top-level shape of the metadata file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct MetadataFile {
    #[serde(rename = "Metadata")]
    pub metadata: MigrationMetadata,

    #[serde(rename = "NodeOffsets")]
    pub node_offsets: String,
}

impl MigrationMetadata {
    #[inline]
    pub fn gender_chunks(&self) -> usize {
        self.gender_data_type.chunks()
    }

    #[inline]
    pub fn age_chunks(&self) -> usize {
        self.ages_years.len().max(1)
    }

    /// Ages at which every destination gets a breakpoint.  `[0.0]` when the
    /// file carries no age dependence.
    pub fn age_breakpoints(&self) -> Vec<f64> {
        if self.ages_years.is_empty() {
            vec![0.0]
        } else {
            self.ages_years.clone()
        }
    }

    #[inline]
    pub fn is_gender_split(&self) -> bool {
        self.gender_chunks() > 1
    }

    #[inline]
    pub fn is_age_dependent(&self) -> bool {
        self.ages_years.len() > 1
    }

    #[inline]
    pub fn is_age_or_gender_dependent(&self) -> bool {
        self.is_age_dependent() || self.is_gender_split()
    }

    /// Records per node block.
    #[inline]
    pub fn records_per_node(&self) -> u64 {
        self.datavalue_count as u64 * self.gender_chunks() as u64 * self.age_chunks() as u64
    }

    /// Bytes per node block.
    #[inline]
    pub fn block_size(&self) -> u64 {
        self.records_per_node() * RECORD_SIZE
    }

    /// The exact size the binary file must have.
    #[inline]
    pub fn expected_file_size(&self) -> u64 {
        HEADER_SIZE + self.node_count as u64 * self.block_size()
    }
}

/// `<binary>.json` next to `binary`.
pub fn metadata_path(binary: &Path) -> PathBuf {
    let mut name: OsString = binary.as_os_str().to_owned();
    name.push(".json");
    PathBuf::from(name)
}

// ── NodeOffsets codec ─────────────────────────────────────────────────────────

pub(crate) fn parse_node_offsets(hex: &str, path: &Path) -> FileResult<Vec<(ExternalNodeId, u64)>> {
    let hex = hex.trim();
    if !hex.is_ascii() || hex.len() % OFFSET_ENTRY_LEN != 0 {
        return Err(FileError::Invalid {
            path:     path.to_path_buf(),
            field:    "NodeOffsets",
            expected: format!("ASCII hex string with a multiple of {OFFSET_ENTRY_LEN} digits"),
            found:    format!("{} characters", hex.len()),
        });
    }

    (0..hex.len())
        .step_by(OFFSET_ENTRY_LEN)
        .map(|start| {
            let id = parse_hex(&hex[start..start + 8], path)?;
            let offset = parse_hex(&hex[start + 8..start + OFFSET_ENTRY_LEN], path)?;
            Ok((ExternalNodeId(id), offset as u64))
        })
        .collect()
}

fn parse_hex(digits: &str, path: &Path) -> FileResult<u32> {
    u32::from_str_radix(digits, 16).map_err(|_| FileError::Invalid {
        path:     path.to_path_buf(),
        field:    "NodeOffsets",
        expected: "hexadecimal digits".to_string(),
        found:    format!("{digits:?}"),
    })
}

pub(crate) fn format_node_offsets(entries: &[(ExternalNodeId, u64)]) -> String {
    entries
        .iter()
        .map(|(id, offset)| format!("{:08X}{:08X}", id.0, offset))
        .collect()
}
