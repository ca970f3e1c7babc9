//! `MigrationFileWriter`: builds a binary rate file and its metadata.
//!
//! Used by the demo to emit test inputs and by the round-trip tests.  Blocks
//! are written in the order nodes were added.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use mig_core::ExternalNodeId;

use crate::format::encode_record;
use crate::metadata::{MetadataFile, format_node_offsets};
use crate::{FileError, FileHeader, FileResult, HEADER_SIZE, MigrationMetadata, metadata_path};

pub struct MigrationFileWriter {
    metadata: MigrationMetadata,
    nodes:    Vec<ExternalNodeId>,
    blocks:   Vec<u8>,
}

impl MigrationFileWriter {
    /// `metadata.node_count` is ignored; it is set from the nodes added.
    pub fn new(metadata: MigrationMetadata) -> Self {
        Self {
            metadata,
            nodes: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Append one node block.
    ///
    /// `chunks` holds one destination list per (gender, age) chunk in file
    /// order: gender-major, ages ascending.  Each list may be shorter than
    /// `DatavalueCount`; the remainder is padded with unused slots.
    pub fn add_node(
        &mut self,
        node:   ExternalNodeId,
        chunks: &[Vec<(ExternalNodeId, f32)>],
    ) -> FileResult<()> {
        let encode_err = |reason: String| FileError::Encode { node, reason };

        if node.is_unused() || !node.is_valid() {
            return Err(encode_err("node id is reserved".to_string()));
        }
        if self.nodes.contains(&node) {
            return Err(encode_err("node already added".to_string()));
        }
        let expected_chunks = self.metadata.gender_chunks() * self.metadata.age_chunks();
        if chunks.len() != expected_chunks {
            return Err(encode_err(format!(
                "expected {expected_chunks} chunks, got {}",
                chunks.len()
            )));
        }

        let slots = self.metadata.datavalue_count as usize;
        let mut block = Vec::with_capacity(self.metadata.block_size() as usize);
        for (i, chunk) in chunks.iter().enumerate() {
            if chunk.len() > slots {
                return Err(encode_err(format!(
                    "chunk {i} has {} destinations, limit is {slots}",
                    chunk.len()
                )));
            }
            for &(dest, rate) in chunk {
                encode_record(&mut block, dest.0, rate);
            }
            for _ in chunk.len()..slots {
                encode_record(&mut block, ExternalNodeId::UNUSED.0, 0.0);
            }
        }

        self.nodes.push(node);
        self.blocks.extend_from_slice(&block);
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Write `binary_path` and `<binary_path>.json`.
    pub fn write(&self, binary_path: &Path) -> FileResult<()> {
        let block = self.metadata.block_size();
        let mut entries = Vec::with_capacity(self.nodes.len());
        for (i, &node) in self.nodes.iter().enumerate() {
            let offset = HEADER_SIZE + i as u64 * block;
            if offset > u32::MAX as u64 {
                return Err(FileError::Encode {
                    node,
                    reason: format!("offset {offset} does not fit in 8 hex digits"),
                });
            }
            entries.push((node, offset));
        }

        let mut metadata = self.metadata.clone();
        metadata.node_count = self.nodes.len() as u32;

        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| FileError::Io { path, source }
        };

        let file = File::create(binary_path).map_err(io_err(binary_path))?;
        let mut out = BufWriter::new(file);
        FileHeader::new(metadata.node_count, metadata.datavalue_count)
            .write_to(&mut out)
            .and_then(|_| out.write_all(&self.blocks))
            .and_then(|_| out.flush())
            .map_err(io_err(binary_path))?;

        let json_path = metadata_path(binary_path);
        let doc = MetadataFile {
            metadata,
            node_offsets: format_node_offsets(&entries),
        };
        let json = File::create(&json_path).map_err(io_err(&json_path))?;
        let mut json = BufWriter::new(json);
        serde_json::to_writer_pretty(&mut json, &doc).map_err(|source| FileError::Metadata {
            path: json_path.clone(),
            source,
        })?;
        json.flush().map_err(io_err(&json_path))?;

        debug!("wrote {} nodes to {binary_path:?}", self.nodes.len());
        Ok(())
    }
}
