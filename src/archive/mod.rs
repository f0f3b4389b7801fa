use tracing::debug;

use crate::{
    bitstreams::BitSequence,
    error::{HuffError, Result},
    huffman::{FrequencyTable, K_NUM_SYMBOLS},
    utils::encodings::{ByteReader, VarintCode},
};

pub const MAGIC: [u8; 4] = *b"HUFZ";
pub const VERSION: u8 = 1;

/// Everything in an archive that precedes the payload.
///
/// ```text
/// magic       4 bytes
/// version     1 byte
/// entries     varint, then (byte, count varint) per entry in ascending byte order
/// total bits  varint
/// payload     ceil(total bits / 8) bytes, MSB first
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ArchiveHeader {
    pub version: u8,
    pub table: FrequencyTable,
    pub total_bits: u64,
    /// Offset of the first payload byte.
    pub payload_offset: usize,
}

impl ArchiveHeader {
    /// Parses and validates the header without touching the payload.
    pub fn peek(archive: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(archive);

        let magic = reader.read_exact(MAGIC.len())?;
        if magic != MAGIC {
            return Err(HuffError::format(format!("unrecognized magic {:02x?}", magic)));
        }

        let version = reader.read()?;
        if version != VERSION {
            return Err(HuffError::format(format!("unsupported version {}", version)));
        }

        let entry_count = VarintCode::read_next(&mut reader)?;
        if entry_count > K_NUM_SYMBOLS as u64 {
            return Err(HuffError::format(format!("{} table entries, at most {} allowed", entry_count, K_NUM_SYMBOLS)));
        }

        let mut table = FrequencyTable::new();
        let mut previous: Option<u8> = None;
        let mut total_symbols = 0u64;

        for _ in 0..entry_count {
            let byte = reader.read()?;
            if previous.is_some_and(|p| p >= byte) {
                return Err(HuffError::format(format!("table entry {:#04x} out of order or repeated", byte)));
            }
            previous = Some(byte);

            let count = VarintCode::read_next(&mut reader)?;
            if count == 0 {
                return Err(HuffError::format(format!("table entry {:#04x} has a zero count", byte)));
            }

            total_symbols = total_symbols.checked_add(count)
                .ok_or_else(|| HuffError::format("symbol counts overflow"))?;
            table.add(byte, count);
        }

        let total_bits = VarintCode::read_next(&mut reader)?;
        if total_bits < total_symbols {
            return Err(HuffError::format(format!(
                "{} payload bits cannot hold {} symbols", total_bits, total_symbols
            )));
        }
        if table.is_empty() && total_bits != 0 {
            return Err(HuffError::format(format!("empty table with {} payload bits", total_bits)));
        }
        if table.len() == 1 && total_bits != total_symbols {
            return Err(HuffError::format(format!(
                "single-symbol payload has {} bits for {} symbols", total_bits, total_symbols
            )));
        }

        Ok(ArchiveHeader { version, table, total_bits, payload_offset: reader.position })
    }

    pub fn payload_len(&self) -> u64 {
        self.total_bits.div_ceil(8)
    }
}

pub struct ArchiveCodec;

impl ArchiveCodec {
    pub fn serialize(table: &FrequencyTable, bits: &BitSequence) -> Vec<u8> {
        let header_len = MAGIC.len() + 1
            + VarintCode::len(table.len() as u64)
            + table.iter().map(|(_, count)| 1 + VarintCode::len(count)).sum::<usize>()
            + VarintCode::len(bits.len() as u64);
        let mut os = Vec::with_capacity(header_len + bits.as_bytes().len());

        os.extend_from_slice(&MAGIC);
        os.push(VERSION);

        VarintCode::write_next(&mut os, table.len() as u64);
        for (byte, count) in table.iter() {
            os.push(byte);
            VarintCode::write_next(&mut os, count);
        }

        VarintCode::write_next(&mut os, bits.len() as u64);
        debug_assert_eq!(os.len(), header_len);
        os.extend_from_slice(bits.as_bytes());

        debug!(header_len, payload_len = bits.as_bytes().len(), "serialized archive");

        os
    }

    pub fn deserialize(archive: &[u8]) -> Result<(FrequencyTable, BitSequence)> {
        let header = ArchiveHeader::peek(archive)?;

        let payload = &archive[header.payload_offset..];
        if payload.len() as u64 != header.payload_len() {
            return Err(HuffError::format(format!(
                "payload is {} bytes, {} bits need {}", payload.len(), header.total_bits, header.payload_len()
            )));
        }

        let bit_len = usize::try_from(header.total_bits)
            .map_err(|_| HuffError::format("payload bit length exceeds addressable memory"))?;
        let bits = BitSequence::from_raw_parts(payload.to_vec(), bit_len)?;

        debug!(symbols = header.table.len(), bits = bit_len, "deserialized archive");

        Ok((header.table, bits))
    }
}
