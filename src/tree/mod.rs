use std::{cmp::{Ordering, Reverse}, collections::BinaryHeap};

use log::trace;

use crate::{frequency::FrequencyMap, HuffError, Result, Symbol};

/// A node of a Huffman tree. Children are owned, so the structure is strictly
/// tree-shaped and codes are read root-down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: Symbol,
        weight: u64,
    },
    Internal {
        weight: u64,
        zero: Box<HuffNode>,
        /// Absent only under the root of a single-symbol tree.
        one: Option<Box<HuffNode>>,
    },
}

impl HuffNode {
    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } | HuffNode::Internal { weight, .. } => *weight,
        }
    }

    fn merge(zero: HuffNode, one: HuffNode) -> Self {
        HuffNode::Internal {
            weight: zero.weight() + one.weight(),
            zero: Box::new(zero),
            one: Some(Box::new(one)),
        }
    }
}

/// Priority queue entry. Ordered by weight first, then by the order in which
/// nodes entered the queue, so equal weights pop FIFO.
#[derive(Debug)]
struct HeapNode {
    weight: u64,
    seq: usize,
    node: HuffNode,
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight.cmp(&other.weight).then(self.seq.cmp(&other.seq))
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
        self.weight == other.weight && self.seq == other.seq
    }
}

#[derive(Clone, Debug)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    /// Greedy Huffman construction. The first node popped becomes the `0`
    /// child of the merged parent, the second one the `1` child.
    pub fn build(frequencies: &FrequencyMap) -> Result<Self> {
        let mut freq_tree = BinaryHeap::with_capacity(frequencies.len());
        let mut seq = 0;

        for (symbol, weight) in frequencies.iter() {
            freq_tree.push(Reverse(HeapNode { weight, seq, node: HuffNode::Leaf { symbol, weight } }));
            seq += 1;
        }

        if freq_tree.len() == 1 {
            if let Some(Reverse(only)) = freq_tree.pop() {
                trace!("single symbol tree, synthesizing a 1-bit code");
                return Ok(Self {
                    root: HuffNode::Internal { weight: only.weight, zero: Box::new(only.node), one: None },
                });
            }
        }

        while freq_tree.len() > 1 {
            let (Some(Reverse(zero)), Some(Reverse(one))) = (freq_tree.pop(), freq_tree.pop()) else {
                break;
            };

            let node = HuffNode::merge(zero.node, one.node);
            freq_tree.push(Reverse(HeapNode { weight: node.weight(), seq, node }));
            seq += 1;
        }

        match freq_tree.pop() {
            Some(Reverse(root)) => Ok(Self { root: root.node }),
            None => Err(HuffError::InvalidInput("cannot build a Huffman tree without symbols".into())),
        }
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    /// Sum of the leaf weights, i.e. the message length.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(&self.root, 0)];

        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffNode::Leaf { .. } => max_depth = max_depth.max(depth),
                HuffNode::Internal { zero, one, .. } => {
                    stack.push((zero.as_ref(), depth + 1));
                    if let Some(one) = one {
                        stack.push((one.as_ref(), depth + 1));
                    }
                }
            }
        }

        max_depth
    }
}
