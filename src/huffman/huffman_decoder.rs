use crate::{bitstreams::{BitSequence, BitReader}, error::{HuffError, Result}};

use super::HuffmanNode;

/// Expands `bits` back into `total_symbol_count` bytes using the tree rooted at `root`.
pub fn decode(bits: &BitSequence, root: Option<&HuffmanNode>, total_symbol_count: u64) -> Result<Vec<u8>> {
    match root {
        None => {
            if !bits.is_empty() || total_symbol_count != 0 {
                return Err(HuffError::decoding(format!(
                    "no symbols to decode but {} bits and a count of {} were given",
                    bits.len(), total_symbol_count
                )));
            }
            Ok(Vec::new())
        },
        Some(HuffmanNode::Leaf { byte, .. }) => decode_single(bits, *byte, total_symbol_count),
        Some(root) => decode_tree(bits, root, total_symbol_count),
    }
}

/// A lone leaf spends one `0` bit per occurrence.
fn decode_single(bits: &BitSequence, byte: u8, total_symbol_count: u64) -> Result<Vec<u8>> {
    if (bits.len() as u64) < total_symbol_count {
        return Err(HuffError::decoding(format!(
            "bit sequence exhausted after {} of {} symbols", bits.len(), total_symbol_count
        )));
    }
    if bits.len() as u64 > total_symbol_count {
        return Err(HuffError::decoding(format!(
            "{} trailing bits after {} symbols", bits.len() as u64 - total_symbol_count, total_symbol_count
        )));
    }

    if let Some(pos) = bits.iter().position(|bit| bit) {
        return Err(HuffError::decoding(format!("unexpected 1 bit at {} for a single-symbol tree", pos)));
    }

    Ok(vec![byte; bits.len()])
}

fn decode_tree(bits: &BitSequence, root: &HuffmanNode, total_symbol_count: u64) -> Result<Vec<u8>> {
    let capacity = total_symbol_count.min(bits.len() as u64) as usize;
    let mut output_vec = Vec::with_capacity(capacity);

    let mut reader = BitReader::new(bits);
    let mut curr_node = root;

    while let Some(bit) = reader.read_bit() {
        curr_node = match curr_node {
            HuffmanNode::Internal { left, right, .. } => if bit { right.as_ref() } else { left.as_ref() },
            HuffmanNode::Leaf { .. } => return Err(HuffError::decoding("walk resumed below a leaf")),
        };

        if let HuffmanNode::Leaf { byte, .. } = curr_node {
            output_vec.push(*byte);
            curr_node = root;
        }
    }

    if !std::ptr::eq(curr_node, root) {
        return Err(HuffError::decoding(format!(
            "bit sequence exhausted mid-code after {} symbols", output_vec.len()
        )));
    }

    if output_vec.len() as u64 != total_symbol_count {
        return Err(HuffError::decoding(format!(
            "expected {} symbols, decoded {}", total_symbol_count, output_vec.len()
        )));
    }

    Ok(output_vec)
}
