pub mod tree;
pub mod huffman_encoder;
pub mod huffman_decoder;

use std::collections::BTreeMap;

pub use tree::HuffmanNode;
pub use huffman_encoder::{Code, EncodingMap};

pub const K_NUM_SYMBOLS: usize = 256;

/// Occurrence count of every byte value present in an input.
///
/// Entries are kept in ascending byte order and every stored count is positive, so two
/// tables with the same contents iterate identically no matter how they were filled.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct FrequencyTable {
    freq_map: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the occurrences of each byte value in `bytes`.
    pub fn analyze(bytes: &[u8]) -> Self {
        let mut counts = [0u64; K_NUM_SYMBOLS];
        for &byte in bytes {
            counts[byte as usize] += 1;
        }

        counts.iter()
            .enumerate()
            .map(|(byte, &count)| (byte as u8, count))
            .collect()
    }

    /// Adds `count` occurrences of `byte`. A zero count leaves the table untouched.
    pub fn add(&mut self, byte: u8, count: u64) {
        if count == 0 {
            return;
        }
        let freq = self.freq_map.entry(byte).or_insert(0);
        *freq = freq.saturating_add(count);
    }

    pub fn get(&self, byte: u8) -> Option<u64> {
        self.freq_map.get(&byte).copied()
    }

    /// Number of distinct byte values.
    pub fn len(&self) -> usize {
        self.freq_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freq_map.is_empty()
    }

    /// Sum of all counts, i.e. the length of the analyzed input.
    pub fn total(&self) -> u64 {
        self.freq_map.values().fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    /// Entries in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.freq_map.iter().map(|(&byte, &count)| (byte, count))
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for (byte, count) in iter {
            table.add(byte, count);
        }
        table
    }
}

pub fn analyze(bytes: &[u8]) -> FrequencyTable {
    FrequencyTable::analyze(bytes)
}

#[cfg(test)]
mod tests;
