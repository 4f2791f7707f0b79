use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::frequency::FrequencyTable;

/// Index of a node inside a [`HuffmanTree`] arena.
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        zero: NodeId,
        one: NodeId,
    },
}

impl HuffmanNode {
    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } | HuffmanNode::Internal { weight, .. } => *weight,
        }
    }
}

/// Heap entry ordering subtrees by `(weight, lowest symbol in subtree)`.
///
/// Every symbol lives in exactly one subtree, so no two live entries compare
/// equal and the merge order is fully determined by the frequency table.
#[derive(Debug, PartialEq, Eq)]
struct HeapEntry {
    weight: u64,
    min_symbol: u8,
    id: NodeId,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, reverse for lightest-first
        match other.weight.cmp(&self.weight) {
            Ordering::Equal => other.min_symbol.cmp(&self.min_symbol),
            ord => ord,
        }
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Binary prefix-code tree stored as an arena of nodes.
///
/// Children are referenced by index and every node except the root has
/// exactly one parent. An empty frequency table gives a tree with no root.
#[derive(Debug, Clone, Default)]
pub struct HuffmanTree {
    nodes: Vec<HuffmanNode>,
    root: Option<NodeId>,
}

impl HuffmanTree {
    /// Greedy minimum-combination build.
    ///
    /// The two lightest subtrees are popped, the first becomes the zero-child
    /// and the second the one-child of a new node carrying their summed
    /// weight. With a single distinct symbol the root is that symbol's leaf.
    pub fn build(frequencies: &FrequencyTable) -> Self {
        let mut nodes = Vec::with_capacity(frequencies.distinct() * 2);
        let mut heap: BinaryHeap<HeapEntry> = frequencies
            .iter()
            .map(|(symbol, weight)| {
                nodes.push(HuffmanNode::Leaf { symbol, weight });
                HeapEntry {
                    weight,
                    min_symbol: symbol,
                    id: nodes.len() - 1,
                }
            })
            .collect();

        while heap.len() > 1 {
            let (Some(zero), Some(one)) = (heap.pop(), heap.pop()) else {
                break;
            };

            let weight = zero.weight + one.weight;
            nodes.push(HuffmanNode::Internal {
                weight,
                zero: zero.id,
                one: one.id,
            });
            heap.push(HeapEntry {
                weight,
                min_symbol: zero.min_symbol.min(one.min_symbol),
                id: nodes.len() - 1,
            });
        }

        let root = heap.pop().map(|entry| entry.id);
        trace!(nodes = nodes.len(), ?root, "built huffman tree");

        HuffmanTree { nodes, root }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &HuffmanNode {
        &self.nodes[id]
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, HuffmanNode::Leaf { .. }))
            .count()
    }

    /// Length of the longest root-to-leaf path. A lone leaf root has depth 0.
    pub fn depth(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };

        let mut deepest = 0;
        let mut stack = vec![(root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.node(id) {
                HuffmanNode::Leaf { .. } => deepest = deepest.max(depth),
                HuffmanNode::Internal { zero, one, .. } => {
                    stack.push((*zero, depth + 1));
                    stack.push((*one, depth + 1));
                }
            }
        }
        deepest
    }
}
