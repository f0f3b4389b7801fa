use crate::error::{HuffError, Result};

/// Growable bit buffer packing eight bits per byte, most significant bit first.
///
/// `written_bits` is the true length; the last byte of `os` may be partially filled,
/// in which case its unused low bits are always zero.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct BitSequence {
    os: Vec<u8>,
    written_bits: usize,
}

impl BitSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self { os: Vec::with_capacity(bits.div_ceil(8)), written_bits: 0 }
    }

    /// Rebuilds a sequence from packed bytes and its exact bit length.
    ///
    /// Fails when `os` is not exactly `ceil(bit_len / 8)` bytes long.
    pub fn from_raw_parts(os: Vec<u8>, bit_len: usize) -> Result<Self> {
        if os.len() != bit_len.div_ceil(8) {
            return Err(HuffError::format(format!(
                "payload of {} bytes cannot hold exactly {} bits", os.len(), bit_len
            )));
        }

        let mut os = os;
        let free = (8 - bit_len % 8) % 8;
        if let Some(last) = os.last_mut() {
            *last &= 0xFFu8 << free;
        }

        Ok(Self { os, written_bits: bit_len })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.written_bits
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.written_bits == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.os
    }

    #[inline(always)]
    pub fn push_bit(&mut self, bit: bool) {
        let offset = self.written_bits & 7;
        if offset == 0 {
            self.os.push(0);
        }

        if bit {
            self.os[self.written_bits >> 3] |= 0x80u8 >> offset;
        }

        self.written_bits += 1;
    }

    /// Appends each bit of `code` in order.
    pub fn append_bits(&mut self, code: &[bool]) {
        for &bit in code {
            self.push_bit(bit);
        }
    }

    #[inline(always)]
    pub fn bit_at(&self, index: usize) -> Option<bool> {
        if index >= self.written_bits {
            return None;
        }

        Some(self.os[index >> 3] & (0x80u8 >> (index & 7)) != 0)
    }

    pub fn iter(&self) -> BitReader<'_> {
        BitReader::new(self)
    }
}

impl<'a> IntoIterator for &'a BitSequence {
    type Item = bool;
    type IntoIter = BitReader<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<bool> for BitSequence {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bits = BitSequence::new();
        for bit in iter {
            bits.push_bit(bit);
        }
        bits
    }
}

impl std::fmt::Display for BitSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for bit in self {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Sequential reader over a [`BitSequence`], tracking how many bits it consumed.
#[derive(Clone, Debug)]
pub struct BitReader<'a> {
    is: &'a BitSequence,
    pub read_bits: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(is: &'a BitSequence) -> Self {
        BitReader { is, read_bits: 0 }
    }

    #[inline(always)]
    pub fn read_bit(&mut self) -> Option<bool> {
        let bit = self.is.bit_at(self.read_bits)?;
        self.read_bits += 1;
        Some(bit)
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.is.len() - self.read_bits
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl ExactSizeIterator for BitReader<'_> {}
