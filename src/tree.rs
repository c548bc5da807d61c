//! Huffman tree construction
//!
//! Classic greedy merge over a min-heap. Ties on frequency are broken by
//! insertion sequence: leaves enter in ascending symbol order, and every
//! merged node receives the next sequence number. The node extracted first
//! becomes the left child, so identical inputs always produce identical trees.

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: u8,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    pub fn freq(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { freq, .. } | HuffmanNode::Internal { freq, .. } => *freq,
        }
    }

    fn merge(left: Self, right: Self) -> Self {
        HuffmanNode::Internal {
            freq: left.freq() + right.freq(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 0,
            HuffmanNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 1,
            HuffmanNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

struct HeapEntry {
    seq: usize,
    node: HuffmanNode,
}

impl Eq for HeapEntry {}
impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // min-heap on (freq, seq)
        (other.node.freq(), other.seq).cmp(&(self.node.freq(), self.seq))
    }
}

/// Build the Huffman tree for `freq`, returning its root.
///
/// A single distinct symbol yields a root that is itself a leaf.
pub fn build(freq: &FrequencyTable) -> Result<HuffmanNode> {
    let mut heap: BinaryHeap<HeapEntry> = freq
        .iter()
        .enumerate()
        .map(|(seq, (symbol, count))| HeapEntry {
            seq,
            node: HuffmanNode::Leaf { symbol, freq: count },
        })
        .collect();

    let mut next_seq = heap.len();
    loop {
        let first = heap.pop().ok_or(HuffmanError::EmptyInput)?;
        let Some(second) = heap.pop() else {
            let root = first.node;
            debug!(
                symbols = freq.len(),
                depth = root.depth(),
                "built huffman tree"
            );
            return Ok(root);
        };
        heap.push(HeapEntry {
            seq: next_seq,
            node: HuffmanNode::merge(first.node, second.node),
        });
        next_seq += 1;
    }
}
