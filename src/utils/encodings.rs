use crate::error::{HuffError, Result};

/// Longest LEB128 encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Byte-aligned cursor over an archive, failing with a format error on truncation.
#[derive(Clone, Debug)]
pub struct ByteReader<'a> {
    is: &'a [u8],
    pub position: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(input_stream: &'a [u8]) -> Self {
        ByteReader { is: input_stream, position: 0 }
    }

    #[inline(always)]
    pub fn read(&mut self) -> Result<u8> {
        let byte = *self.is.get(self.position)
            .ok_or_else(|| HuffError::format(format!("archive truncated at byte {}", self.position)))?;
        self.position += 1;
        Ok(byte)
    }

    pub fn read_exact(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.position.checked_add(len)
            .filter(|&end| end <= self.is.len())
            .ok_or_else(|| HuffError::format(format!(
                "archive truncated: wanted {} bytes at offset {}, {} available",
                len, self.position, self.remaining()
            )))?;

        let slice = &self.is[self.position..end];
        self.position = end;
        Ok(slice)
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.is.len() - self.position
    }
}

/// Unsigned LEB128: seven data bits per byte, least significant group first,
/// high bit set on every byte but the last.
pub struct VarintCode;

impl VarintCode {
    pub fn write_next(writer: &mut Vec<u8>, x: u64) -> usize {
        let mut x = x;
        let mut written = 1;

        while x >= 0x80 {
            writer.push((x as u8 & 0x7F) | 0x80);
            x >>= 7;
            written += 1;
        }
        writer.push(x as u8);

        written
    }

    pub fn read_next(reader: &mut ByteReader) -> Result<u64> {
        let mut x = 0u64;

        for i in 0..MAX_VARINT_LEN {
            let byte = reader.read()?;
            let group = (byte & 0x7F) as u64;
            let shift = 7 * i as u32;

            // the tenth byte may only carry the top bit of a u64
            if i == MAX_VARINT_LEN - 1 && group > 1 {
                return Err(HuffError::format("varint overflows 64 bits"));
            }

            x |= group << shift;

            if byte & 0x80 == 0 {
                return Ok(x);
            }
        }

        Err(HuffError::format("varint longer than 10 bytes"))
    }

    pub fn len(x: u64) -> usize {
        let significant = u64::BITS - x.leading_zeros();
        (significant as usize).div_ceil(7).max(1)
    }
}
