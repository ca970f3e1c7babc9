//! `mig-file`: binary migration-rate files.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                         |
//! |--------------|------------------------------------------------------------------|
//! | [`format`]   | Header layout, record size, byte-level helpers                   |
//! | [`metadata`] | `MigrationMetadata`, `GenderDataType`, `NodeOffsets` hex codec   |
//! | [`reader`]   | `MigrationFileReader`: validated, seek-per-node rate loading    |
//! | [`writer`]   | `MigrationFileWriter`: produces binary + metadata pairs         |
//! | [`error`]    | `FileError`, `FileResult<T>`                                     |
//!
//! # File pair
//!
//! Each migration type is described by two files sharing a base name:
//!
//! ```text
//! Local_Migration.bin        16-byte header, then one fixed-size block per node
//! Local_Migration.bin.json   {"Metadata": {...}, "NodeOffsets": "<hex>"}
//! ```
//!
//! A node block holds, for each gender chunk (male, then female) and each age
//! chunk (ascending `AgesYears`), `DatavalueCount` records of
//! `(u32 destination id, f32 rate)`, little-endian.  Destination id `0` marks
//! an unused slot.
//!
//! The total size is fully determined by the metadata:
//!
//! ```text
//! size = HEADER_SIZE + NodeCount × DatavalueCount × genders × ages × RECORD_SIZE
//! ```
//!
//! and is checked before any node is read.

pub mod error;
pub mod format;
pub mod metadata;
pub mod reader;
pub mod writer;


pub use error::{FileError, FileResult};
pub use format::{FileHeader, FORMAT_VERSION, HEADER_SIZE, MAGIC, RECORD_SIZE};
pub use metadata::{GenderDataType, MigrationMetadata, metadata_path};
pub use reader::MigrationFileReader;
pub use writer::MigrationFileWriter;
