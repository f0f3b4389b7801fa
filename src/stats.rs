use std::io;

use serde::Serialize;

use crate::{error::Result, utils::timer::Timer};

/// Sizes and per-phase timings of a single compress or decompress call.
#[derive(Clone, Default, PartialEq, Serialize, Debug)]
pub struct CompressionStats {
    pub input_len: usize,
    pub output_len: usize,
    pub symbols: usize,
    pub payload_bits: usize,
    pub average_code_len: f64,
    pub frequency_time: u64,
    pub tree_time: u64,
    pub code_map_time: u64,
    pub coding_time: u64,
    pub archive_time: u64,
}

impl CompressionStats {
    /// Output size over input size; 0 for an empty input.
    pub fn ratio(&self) -> f64 {
        if self.input_len == 0 {
            return 0.0;
        }
        self.output_len as f64 / self.input_len as f64
    }

    pub fn total_time(&self) -> u64 {
        self.frequency_time + self.tree_time + self.code_map_time + self.coding_time + self.archive_time
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self).map_err(io::Error::from)?)
    }
}

/// One timer per pipeline phase.
#[derive(Default, Debug)]
pub(crate) struct PhaseTimers {
    pub frequency: Timer,
    pub tree: Timer,
    pub code_map: Timer,
    pub coding: Timer,
    pub archive: Timer,
}

impl PhaseTimers {
    pub fn record(&self, stats: &mut CompressionStats) {
        stats.frequency_time = self.frequency.total_time as u64;
        stats.tree_time = self.tree.total_time as u64;
        stats.code_map_time = self.code_map.total_time as u64;
        stats.coding_time = self.coding.total_time as u64;
        stats.archive_time = self.archive.total_time as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::compress_with_stats;

    #[test]
    fn test_stats_json() {
        let (archive, stats) = compress_with_stats(b"AAAB").unwrap();
        let json: serde_json::Value = serde_json::from_str(&stats.to_json().unwrap()).unwrap();

        assert_eq!(json["input_len"], 4);
        assert_eq!(json["output_len"], archive.len());
        assert_eq!(json["symbols"], 2);
        assert_eq!(json["payload_bits"], 4);
        assert_eq!(json["average_code_len"], 1.0);
        assert!(json["coding_time"].is_u64());
    }

    #[test]
    fn test_ratio_of_empty_input() {
        let stats = CompressionStats { output_len: 6, ..Default::default() };
        assert_eq!(stats.ratio(), 0.0);
    }
}
