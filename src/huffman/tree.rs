use std::{collections::BinaryHeap, cmp::{Ordering, Reverse}};

use tracing::trace;

use super::FrequencyTable;

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum HuffmanNode {
    Leaf {
        weight: u64,
        byte: u8,
    },
    Internal {
        weight: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    pub fn new(byte: u8, weight: u64) -> Self {
        HuffmanNode::Leaf { weight, byte }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } => *weight,
            HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    /// Joins two subtrees; `left` is the one popped first.
    pub fn merge(left: Self, right: Self) -> Self {
        HuffmanNode::Internal {
            weight: left.weight().saturating_add(right.weight()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            match node {
                HuffmanNode::Leaf { .. } => count += 1,
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push(right.as_ref());
                    stack.push(left.as_ref());
                }
            }
        }

        count
    }
}

/// Queue entry: a subtree plus the smallest byte value it contains.
///
/// Live subtrees are disjoint, so `(weight, key)` never ties between two distinct
/// entries and the pop order depends only on the table's contents.
#[derive(Debug)]
struct HeapNode {
    key: u8,
    node: HuffmanNode,
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node.weight().cmp(&other.node.weight())
            .then_with(|| self.key.cmp(&other.key))
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for HeapNode {}

impl PartialEq for HeapNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

/// Builds the Huffman tree for `table`, or `None` when the table is empty.
///
/// A table with a single byte value yields a lone leaf.
pub fn build(table: &FrequencyTable) -> Option<HuffmanNode> {
    let mut freq_tree: BinaryHeap<Reverse<HeapNode>> = table.iter()
        .map(|(byte, weight)| Reverse(HeapNode { key: byte, node: HuffmanNode::new(byte, weight) }))
        .collect();

    while freq_tree.len() > 1 {
        let (Some(Reverse(first)), Some(Reverse(second))) = (freq_tree.pop(), freq_tree.pop()) else {
            break;
        };

        trace!(
            left_key = first.key, left_weight = first.node.weight(),
            right_key = second.key, right_weight = second.node.weight(),
            "merging subtrees"
        );

        freq_tree.push(Reverse(HeapNode {
            key: first.key.min(second.key),
            node: HuffmanNode::merge(first.node, second.node),
        }));
    }

    freq_tree.pop().map(|Reverse(root)| root.node)
}
