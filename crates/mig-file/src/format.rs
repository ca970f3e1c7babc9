//! Byte layout of the binary rate file.

use std::io::{Read, Write};

/// File signature.
pub const MAGIC: [u8; 4] = *b"MIGR";

pub const FORMAT_VERSION: u32 = 1;

/// Magic + version + node count + destinations per node.
pub const HEADER_SIZE: u64 = 16;

/// One `u32` destination id plus one `f32` rate.
pub const RECORD_SIZE: u64 = 8;

/// The fixed-size header at the start of every rate file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub magic:           [u8; 4],
    pub version:         u32,
    pub node_count:      u32,
    pub datavalue_count: u32,
}

impl FileHeader {
    pub fn new(node_count: u32, datavalue_count: u32) -> Self {
        Self {
            magic: MAGIC,
            version: FORMAT_VERSION,
            node_count,
            datavalue_count,
        }
    }

    pub fn read_from<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut buf = [0u8; HEADER_SIZE as usize];
        reader.read_exact(&mut buf)?;
        Ok(Self {
            magic:           [buf[0], buf[1], buf[2], buf[3]],
            version:         le_u32(&buf[4..8]),
            node_count:      le_u32(&buf[8..12]),
            datavalue_count: le_u32(&buf[12..16]),
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.magic)?;
        writer.write_all(&self.version.to_le_bytes())?;
        writer.write_all(&self.node_count.to_le_bytes())?;
        writer.write_all(&self.datavalue_count.to_le_bytes())
    }
}

/// Decode a little-endian `u32` from the first four bytes of `bytes`.
#[inline]
pub(crate) fn le_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Decode one `(destination id, rate)` record.
#[inline]
pub(crate) fn decode_record(record: &[u8]) -> (u32, f32) {
    let id = le_u32(&record[0..4]);
    let rate = f32::from_le_bytes([record[4], record[5], record[6], record[7]]);
    (id, rate)
}

#[inline]
pub(crate) fn encode_record(out: &mut Vec<u8>, id: u32, rate: f32) {
    out.extend_from_slice(&id.to_le_bytes());
    out.extend_from_slice(&rate.to_le_bytes());
}
