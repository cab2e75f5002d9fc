//! Huffman tree construction
//!
//! Nodes own their children directly, so dropping the root tears the whole
//! tree down. Construction is deterministic: the priority queue orders nodes
//! by `(weight, sequence)` where leaves are numbered in ascending symbol order
//! and each merged node takes the next number. The first node popped becomes
//! the left child.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use crate::code_table::CodeTable;
use crate::error::{CodecError, Result};
use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;

/// A tree node: a leaf carrying a symbol, or an internal node whose `0`
/// branch is `left` and whose `1` branch is `right`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanNode<S: Symbol> {
    weight: u64,
    symbol: Option<S>,
    left: Option<Box<HuffmanNode<S>>>,
    right: Option<Box<HuffmanNode<S>>>,
}

impl<S: Symbol> HuffmanNode<S> {
    fn leaf(symbol: S, weight: u64) -> Self {
        Self {
            weight,
            symbol: Some(symbol),
            left: None,
            right: None,
        }
    }

    fn merge(left: Self, right: Self) -> Self {
        Self {
            weight: left.weight + right.weight,
            symbol: None,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    fn empty() -> Self {
        Self {
            weight: 0,
            symbol: None,
            left: None,
            right: None,
        }
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// The symbol of a leaf, `None` for internal nodes.
    pub fn symbol(&self) -> Option<S> {
        self.symbol
    }

    pub fn left(&self) -> Option<&HuffmanNode<S>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&HuffmanNode<S>> {
        self.right.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Child reached by `bit` (`false` = left, `true` = right).
    pub fn child(&self, bit: bool) -> Option<&HuffmanNode<S>> {
        if bit {
            self.right()
        } else {
            self.left()
        }
    }

    fn depth(&self) -> usize {
        let l = self.left().map_or(0, |n| n.depth() + 1);
        let r = self.right().map_or(0, |n| n.depth() + 1);
        l.max(r)
    }

    fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            return 1;
        }
        self.left().map_or(0, |n| n.leaf_count()) + self.right().map_or(0, |n| n.leaf_count())
    }

    /// Every node is either a symbol leaf or a symbol-less node with two children.
    fn check_shape(&self, path: &mut String) -> Result<()> {
        match (self.symbol, &self.left, &self.right) {
            (Some(_), None, None) => Ok(()),
            (None, Some(left), Some(right)) => {
                path.push('0');
                left.check_shape(path)?;
                path.pop();
                path.push('1');
                right.check_shape(path)?;
                path.pop();
                Ok(())
            }
            (None, None, None) => Err(CodecError::MalformedTree(format!(
                "node at path '{}' has neither symbol nor children",
                path
            ))),
            (Some(_), _, _) => Err(CodecError::MalformedTree(format!(
                "leaf at path '{}' also has children",
                path
            ))),
            (None, _, _) => Err(CodecError::MalformedTree(format!(
                "node at path '{}' has exactly one child",
                path
            ))),
        }
    }
}

/// Priority queue entry; `BinaryHeap` is a max-heap so ordering is reversed.
struct QueueEntry<S: Symbol> {
    seq: u64,
    node: HuffmanNode<S>,
}

impl<S: Symbol> PartialEq for QueueEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.node.weight == other.node.weight && self.seq == other.seq
    }
}

impl<S: Symbol> Eq for QueueEntry<S> {}

impl<S: Symbol> PartialOrd for QueueEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Symbol> Ord for QueueEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .weight
            .cmp(&self.node.weight)
            .then_with(|| other.seq.cmp(&self.seq)) // min-heap
    }
}

/// A complete prefix code as a binary tree.
///
/// A one-symbol alphabet yields a tree whose root is that leaf; it is given
/// the fixed code `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<S: Symbol> {
    root: HuffmanNode<S>,
}

impl<S: Symbol> HuffmanTree<S> {
    /// Build the tree for a frequency distribution.
    pub fn build(frequencies: &FrequencyTable<S>) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(CodecError::EmptyAlphabet);
        }

        let mut heap = BinaryHeap::with_capacity(frequencies.len());
        let mut seq = 0u64;
        for (symbol, weight) in frequencies.iter() {
            heap.push(QueueEntry {
                seq,
                node: HuffmanNode::leaf(symbol, weight),
            });
            seq += 1;
        }

        let root = loop {
            let Some(left) = heap.pop() else {
                return Err(CodecError::EmptyAlphabet);
            };
            let Some(right) = heap.pop() else {
                break left.node;
            };
            trace!(
                left = left.node.weight,
                right = right.node.weight,
                seq,
                "merging nodes"
            );
            heap.push(QueueEntry {
                seq,
                node: HuffmanNode::merge(left.node, right.node),
            });
            seq += 1;
        };

        let tree = Self { root };
        debug!(
            symbols = frequencies.len(),
            weight = tree.weight(),
            depth = tree.depth(),
            "built huffman tree"
        );
        Ok(tree)
    }

    /// Rebuild a decoding tree from a code table.
    ///
    /// Leaf weights are not recoverable from codes and are set to zero.
    pub fn from_code_table(table: &CodeTable<S>) -> Result<Self> {
        if table.is_empty() {
            return Err(CodecError::EmptyAlphabet);
        }

        if table.len() == 1 {
            let (symbol, code) = table.iter().next().ok_or(CodecError::EmptyAlphabet)?;
            if code.bits() != [false] {
                return Err(CodecError::MalformedTree(format!(
                    "single symbol {} must use code '0', found '{}'",
                    symbol.label(),
                    code
                )));
            }
            return Ok(Self {
                root: HuffmanNode::leaf(symbol, 0),
            });
        }

        let mut root = HuffmanNode::empty();
        for (symbol, code) in table.iter() {
            insert_path(&mut root, symbol, code.bits())?;
        }
        root.check_shape(&mut String::new())?;

        debug!(symbols = table.len(), "rebuilt huffman tree from code table");
        Ok(Self { root })
    }

    pub fn root(&self) -> &HuffmanNode<S> {
        &self.root
    }

    /// Total weight, i.e. the number of symbols the tree was built from.
    pub fn weight(&self) -> u64 {
        self.root.weight
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Longest root-to-leaf path; zero for a degenerate tree.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// True when the alphabet has a single symbol and the root is its leaf.
    pub fn is_degenerate(&self) -> bool {
        self.root.is_leaf()
    }
}

fn insert_path<S: Symbol>(root: &mut HuffmanNode<S>, symbol: S, bits: &[bool]) -> Result<()> {
    let Some((&last, prefix)) = bits.split_last() else {
        return Err(CodecError::MalformedTree(format!(
            "symbol {} has an empty code",
            symbol.label()
        )));
    };

    let conflict = || {
        CodecError::MalformedTree(format!(
            "code of symbol {} collides with another code",
            symbol.label()
        ))
    };

    let mut node = root;
    for &bit in prefix {
        if node.symbol.is_some() {
            return Err(conflict());
        }
        let slot = if bit { &mut node.right } else { &mut node.left };
        node = slot.get_or_insert_with(|| Box::new(HuffmanNode::empty())).as_mut();
    }
    if node.symbol.is_some() {
        return Err(conflict());
    }
    let slot = if last { &mut node.right } else { &mut node.left };
    if slot.is_some() {
        return Err(conflict());
    }
    *slot = Some(Box::new(HuffmanNode::leaf(symbol, 0)));
    Ok(())
}
