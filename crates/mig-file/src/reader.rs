//! `MigrationFileReader`: one validated rate file for one migration type.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use log::{debug, info};

use mig_core::{ExternalNodeId, MigrationType, NodeIdMap};
use mig_rates::{RateData, RateTable};

use crate::format::decode_record;
use crate::metadata::{MetadataFile, parse_node_offsets};
use crate::{
    FORMAT_VERSION, FileError, FileHeader, FileResult, HEADER_SIZE, MAGIC, MigrationMetadata,
    RECORD_SIZE, metadata_path,
};

/// Loads per-node rate tables for one migration type from a binary file.
///
/// # Lifecycle
///
/// 1. [`new`](Self::new) records configuration only; no I/O.
/// 2. [`initialize`](Self::initialize) reads and validates the metadata,
///    opens the binary file, and checks its size and header.  Any mismatch is
///    a fatal error.
/// 3. [`read_data`](Self::read_data) seeks to and reads one block per node.
///
/// A disabled reader skips step 2 and returns no data from step 3.
pub struct MigrationFileReader {
    migration_type:   MigrationType,
    max_destinations: usize,
    enabled:          bool,
    path:             PathBuf,
    x_modifier:       f64,
    metadata:         Option<MigrationMetadata>,
    offsets:          HashMap<ExternalNodeId, u64>,
    file:             Option<BufReader<File>>,
}

impl MigrationFileReader {
    /// Configure a reader.  `x_modifier` scales every rate read.
    pub fn new(
        migration_type:   MigrationType,
        max_destinations: usize,
        enabled:          bool,
        path:             impl Into<PathBuf>,
        x_modifier:       f64,
    ) -> Self {
        Self {
            migration_type,
            max_destinations,
            enabled,
            path: path.into(),
            x_modifier,
            metadata: None,
            offsets: HashMap::new(),
            file: None,
        }
    }

    /// A reader for a type that is not configured.
    pub fn disabled(migration_type: MigrationType) -> Self {
        Self::new(migration_type, migration_type.max_destinations(), false, PathBuf::new(), 1.0)
    }

    /// Validate the metadata against `id_reference` (the demographics id
    /// space) and open the binary file.
    pub fn initialize(&mut self, id_reference: &str) -> FileResult<()> {
        if !self.enabled {
            return Ok(());
        }
        let expected_size = self.parse_metadata_for_file(id_reference)?;
        self.open_migration_file(expected_size)?;

        if let Some(meta) = &self.metadata {
            info!(
                "{}: {} nodes, {} destinations/node, {} gender chunk(s), {} age chunk(s), x{}",
                self.migration_type,
                meta.node_count,
                meta.datavalue_count,
                meta.gender_chunks(),
                meta.age_chunks(),
                self.x_modifier,
            );
        }
        Ok(())
    }

    /// Read and validate `<binary>.json`; return the expected binary size.
    pub fn parse_metadata_for_file(&mut self, id_reference: &str) -> FileResult<u64> {
        let json_path = metadata_path(&self.path);
        debug!("reading migration metadata {json_path:?}");

        let file = File::open(&json_path).map_err(|source| FileError::Io {
            path: json_path.clone(),
            source,
        })?;
        let parsed: MetadataFile = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| FileError::Metadata {
                path: json_path.clone(),
                source,
            })?;
        let meta = parsed.metadata;

        let invalid = |field: &'static str, expected: String, found: String| FileError::Invalid {
            path: json_path.clone(),
            field,
            expected,
            found,
        };

        if !meta.id_reference.eq_ignore_ascii_case(id_reference) {
            return Err(invalid("IdReference", format!("{id_reference:?}"), format!("{:?}", meta.id_reference)));
        }
        if let Some(declared) = meta.migration_type {
            if declared != self.migration_type {
                return Err(invalid("MigrationType", self.migration_type.to_string(), declared.to_string()));
            }
        }
        let dv = meta.datavalue_count as usize;
        if dv == 0 || dv > self.max_destinations {
            return Err(invalid(
                "DatavalueCount",
                format!("1..={} for {}", self.max_destinations, self.migration_type),
                dv.to_string(),
            ));
        }
        let ages_ok = meta.ages_years.iter().all(|a| a.is_finite() && *a >= 0.0)
            && meta.ages_years.windows(2).all(|w| w[0] < w[1]);
        if !ages_ok {
            return Err(invalid(
                "AgesYears",
                "strictly increasing non-negative ages".to_string(),
                format!("{:?}", meta.ages_years),
            ));
        }

        let entries = parse_node_offsets(&parsed.node_offsets, &json_path)?;
        if entries.len() != meta.node_count as usize {
            return Err(invalid("NodeOffsets entries", meta.node_count.to_string(), entries.len().to_string()));
        }

        let mut offsets = HashMap::with_capacity(entries.len());
        let mut blocks = HashSet::with_capacity(entries.len());
        for (node, offset) in entries {
            if offsets.insert(node, offset).is_some() {
                return Err(invalid("NodeOffsets", "unique node ids".to_string(), format!("{node} repeated")));
            }
            if !blocks.insert(offset) {
                return Err(invalid(
                    "NodeOffsets",
                    "one block per node".to_string(),
                    format!("offset {offset} repeated at {node}"),
                ));
            }
        }

        let expected = meta.expected_file_size();
        self.offsets = offsets;
        self.metadata = Some(meta);
        Ok(expected)
    }

    /// Open the binary file and check it against the parsed metadata.
    pub fn open_migration_file(&mut self, expected_size: u64) -> FileResult<()> {
        let meta = self
            .metadata
            .as_ref()
            .ok_or(FileError::NotInitialized(self.migration_type))?;
        let path = &self.path;
        let io_err = |source| FileError::Io { path: path.clone(), source };

        let file = File::open(path).map_err(io_err)?;
        let actual_size = file.metadata().map_err(io_err)?.len();
        if actual_size != expected_size {
            return Err(FileError::SizeMismatch {
                path:     path.clone(),
                expected: expected_size,
                actual:   actual_size,
            });
        }

        let mut reader = BufReader::new(file);
        let header = FileHeader::read_from(&mut reader).map_err(io_err)?;
        let invalid = |field: &'static str, expected: String, found: String| FileError::Invalid {
            path: path.clone(),
            field,
            expected,
            found,
        };
        if header.magic != MAGIC {
            return Err(invalid("header magic", format!("{MAGIC:?}"), format!("{:?}", header.magic)));
        }
        if header.version != FORMAT_VERSION {
            return Err(invalid("header version", FORMAT_VERSION.to_string(), header.version.to_string()));
        }
        if header.node_count != meta.node_count {
            return Err(invalid("header node count", meta.node_count.to_string(), header.node_count.to_string()));
        }
        if header.datavalue_count != meta.datavalue_count {
            return Err(invalid(
                "header destinations per node",
                meta.datavalue_count.to_string(),
                header.datavalue_count.to_string(),
            ));
        }

        let block = meta.block_size();
        for (node, &offset) in &self.offsets {
            let aligned = offset >= HEADER_SIZE && (offset - HEADER_SIZE) % block == 0;
            if !aligned || offset + block > actual_size {
                return Err(invalid(
                    "node offset",
                    format!("block start inside file for {node}"),
                    offset.to_string(),
                ));
            }
        }

        debug!("opened {path:?} ({actual_size} bytes)");
        self.file = Some(reader);
        Ok(())
    }

    /// Rate tables for `node`, one list per gender chunk.
    ///
    /// Each used destination slot becomes one [`RateTable`] holding a
    /// breakpoint per age chunk, rates scaled by the reader's modifier.  Slots
    /// with destination id `0` are skipped.  Nodes absent from the file, and
    /// disabled readers, yield no data.
    ///
    /// # Errors
    ///
    /// `UnknownDestination` if a destination is not in `node_ids`;
    /// `InconsistentDestination` if a slot changes destination between chunks.
    pub fn read_data(&mut self, node: ExternalNodeId, node_ids: &NodeIdMap) -> FileResult<RateData> {
        if !self.enabled {
            return Ok(Vec::new());
        }
        let (Some(meta), Some(file)) = (&self.metadata, self.file.as_mut()) else {
            return Err(FileError::NotInitialized(self.migration_type));
        };
        let Some(&offset) = self.offsets.get(&node) else {
            debug!("{}: node {node} not present in {:?}", self.migration_type, self.path);
            return Ok(Vec::new());
        };

        let path = &self.path;
        let mut block = vec![0u8; meta.block_size() as usize];
        file.seek(SeekFrom::Start(offset))
            .and_then(|_| file.read_exact(&mut block))
            .map_err(|source| FileError::Io { path: path.clone(), source })?;

        let slots = meta.datavalue_count as usize;
        let ages = meta.age_breakpoints();
        let chunk_bytes = slots * RECORD_SIZE as usize;
        let mut chunks = block.chunks_exact(chunk_bytes);

        let mut rate_data = Vec::with_capacity(meta.gender_chunks());
        for _gender in 0..meta.gender_chunks() {
            // (destination, rate per age) for each slot.
            let mut columns: Vec<(ExternalNodeId, Vec<f64>)> =
                vec![(ExternalNodeId::UNUSED, Vec::with_capacity(ages.len())); slots];

            for age_index in 0..ages.len() {
                let chunk = chunks.next().unwrap_or_default();
                for (slot, record) in chunk.chunks_exact(RECORD_SIZE as usize).enumerate() {
                    let (id, rate) = decode_record(record);
                    let dest = ExternalNodeId(id);
                    let column = &mut columns[slot];
                    if age_index == 0 {
                        column.0 = dest;
                    } else if column.0 != dest {
                        return Err(FileError::InconsistentDestination {
                            path:  path.clone(),
                            node,
                            slot,
                            first: column.0,
                            other: dest,
                        });
                    }
                    column.1.push(rate as f64 * self.x_modifier);
                }
            }

            let mut tables = Vec::with_capacity(slots);
            for (dest, rates) in columns {
                if dest.is_unused() {
                    continue;
                }
                let suid = node_ids.suid(dest).ok_or_else(|| FileError::UnknownDestination {
                    path:        path.clone(),
                    node,
                    destination: dest,
                })?;
                let mut table = RateTable::new(suid, self.migration_type, meta.interpolation_type);
                for (&age, rate) in ages.iter().zip(rates) {
                    table
                        .add_rate(age, rate)
                        .map_err(|source| FileError::Rates { path: path.clone(), node, source })?;
                }
                tables.push(table);
            }
            rate_data.push(tables);
        }

        Ok(rate_data)
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn migration_type(&self) -> MigrationType {
        self.migration_type
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parsed metadata; `None` until initialized (or when disabled).
    #[inline]
    pub fn metadata(&self) -> Option<&MigrationMetadata> {
        self.metadata.as_ref()
    }

    /// `true` if the loaded file varies by age or gender.
    pub fn is_age_and_gender_dependent(&self) -> bool {
        self.metadata
            .as_ref()
            .is_some_and(MigrationMetadata::is_age_or_gender_dependent)
    }
}
