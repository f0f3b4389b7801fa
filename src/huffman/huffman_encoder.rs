use std::fmt;

use crate::{bitstreams::BitSequence, error::{HuffError, Result}};

use super::{HuffmanNode, FrequencyTable, K_NUM_SYMBOLS};

/// Root-to-leaf path of a symbol: `false` for a left edge, `true` for a right edge.
#[derive(Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in self.0.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl From<Vec<bool>> for Code {
    fn from(bits: Vec<bool>) -> Self {
        Code(bits)
    }
}

/// Byte value to code lookup built from a Huffman tree.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct EncodingMap {
    code_map: Vec<Option<Code>>,
    symbols: usize,
}

impl Default for EncodingMap {
    fn default() -> Self {
        Self { code_map: vec![None; K_NUM_SYMBOLS], symbols: 0 }
    }
}

impl EncodingMap {
    /// Collects the root-to-leaf path of every leaf, walking the tree with an explicit
    /// stack. A lone leaf root gets the one-bit code `0`.
    pub fn build(root: Option<&HuffmanNode>) -> Self {
        let mut map = EncodingMap::default();

        let Some(root) = root else {
            return map;
        };

        if let HuffmanNode::Leaf { byte, .. } = root {
            map.insert(*byte, Code(vec![false]));
            return map;
        }

        let mut stack: Vec<(&HuffmanNode, Vec<bool>)> = vec![(root, Vec::new())];

        while let Some((node, path)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { byte, .. } => map.insert(*byte, Code(path)),
                HuffmanNode::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    stack.push((right.as_ref(), right_path));

                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((left.as_ref(), left_path));
                }
            }
        }

        map
    }

    fn insert(&mut self, byte: u8, code: Code) {
        if self.code_map[byte as usize].replace(code).is_none() {
            self.symbols += 1;
        }
    }

    #[inline(always)]
    pub fn get(&self, byte: u8) -> Option<&Code> {
        self.code_map[byte as usize].as_ref()
    }

    pub fn len(&self) -> usize {
        self.symbols
    }

    pub fn is_empty(&self) -> bool {
        self.symbols == 0
    }

    /// Codes in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.code_map.iter()
            .enumerate()
            .filter_map(|(byte, code)| code.as_ref().map(|c| (byte as u8, c)))
    }

    /// Exact number of bits the input described by `table` encodes to.
    pub fn encoded_len(&self, table: &FrequencyTable) -> Option<u64> {
        table.iter().try_fold(0u64, |acc, (byte, count)| {
            let len = self.get(byte)?.len() as u64;
            acc.checked_add(len.checked_mul(count)?)
        })
    }

    /// Weighted mean code length in bits per symbol; 0 for an empty table.
    pub fn average_code_len(&self, table: &FrequencyTable) -> f64 {
        let total = table.total();
        if total == 0 {
            return 0.0;
        }

        let bits: f64 = table.iter()
            .filter_map(|(byte, count)| self.get(byte).map(|c| c.len() as f64 * count as f64))
            .sum();

        bits / total as f64
    }
}

/// Concatenates the code of every byte of `data`, in order.
pub fn encode(data: &[u8], map: &EncodingMap) -> Result<BitSequence> {
    let mut writer = BitSequence::new();

    for &byte in data {
        let code = map.get(byte).ok_or(HuffError::Encoding(byte))?;
        writer.append_bits(code.bits());
    }

    Ok(writer)
}
