//! Huffman code tree construction.
//!
//! # Algorithm
//!
//! One leaf per alphabet entry goes into a min-heap. The two lowest-priority
//! nodes are popped (the first becomes the left child, the second the right),
//! merged into an internal node carrying the summed frequency, and pushed
//! back. When one node remains it is the root.
//!
//! # Tie-break
//!
//! Heap priority is the pair `(frequency, order)`. `order` is an insertion
//! tag assigned at node creation: leaves get `0..n` in alphabet order, each
//! merged node takes the next value. Frequencies compare with
//! [`f64::total_cmp`]. Equal frequencies therefore always resolve the same
//! way, and a given alphabet (in a given order) always yields the same tree.
//!
//! # Single-symbol alphabets
//!
//! The root is itself a leaf with depth 0. [`CodeTable`](crate::codes::CodeTable)
//! gives it the one-bit code `0` so the code is never empty.

use crate::alphabet::Alphabet;
use crate::error::{AlphabetError, Result};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

/// Modelled storage cost of one node: symbol slot + frequency slot + two
/// child pointers.
pub const NODE_SIZE_BITS: usize = 8 + 32 + 64 + 64;

/// A node of the code tree.
///
/// Internal nodes always own exactly two children.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf {
        symbol: String,
        frequency: f64,
        order: usize,
    },
    Internal {
        frequency: f64,
        order: usize,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn frequency(&self) -> f64 {
        match self {
            Node::Leaf { frequency, .. } | Node::Internal { frequency, .. } => *frequency,
        }
    }

    /// Insertion-order tag used as the tie-break key.
    pub fn order(&self) -> usize {
        match self {
            Node::Leaf { order, .. } | Node::Internal { order, .. } => *order,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn symbol(&self) -> Option<&str> {
        match self {
            Node::Leaf { symbol, .. } => Some(symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Follow one bit: `false` goes left, `true` goes right.
    ///
    /// Returns `None` on a leaf.
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }

    fn count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => 1 + left.count() + right.count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn collect_symbols<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Leaf { symbol, .. } => out.push(symbol),
            Node::Internal { left, right, .. } => {
                left.collect_symbols(out);
                right.collect_symbols(out);
            }
        }
    }
}

/// A node waiting in the builder's heap.
#[derive(Debug)]
struct Queued(Node);

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap: lowest (frequency, order) pops first
        other
            .0
            .frequency()
            .total_cmp(&self.0.frequency())
            .then_with(|| other.0.order().cmp(&self.0.order()))
    }
}

/// An immutable Huffman code tree.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeTree {
    root: Node,
    node_count: usize,
    leaf_count: usize,
}

impl CodeTree {
    /// Build the code tree for an alphabet.
    ///
    /// # Errors
    /// `AlphabetError::Empty` if the alphabet has no entries. A constructed
    /// [`Alphabet`] is never empty, so this only guards the invariant.
    pub fn build(alphabet: &Alphabet) -> Result<Self> {
        let mut heap: BinaryHeap<Queued> = alphabet
            .entries()
            .iter()
            .enumerate()
            .map(|(order, entry)| {
                Queued(Node::Leaf {
                    symbol: entry.symbol.clone(),
                    frequency: entry.frequency,
                    order,
                })
            })
            .collect();

        let mut next_order = heap.len();

        loop {
            let Some(Queued(left)) = heap.pop() else {
                return Err(AlphabetError::Empty.into());
            };
            let Some(Queued(right)) = heap.pop() else {
                return Ok(Self::from_root(left));
            };

            heap.push(Queued(Node::Internal {
                frequency: left.frequency() + right.frequency(),
                order: next_order,
                left: Box::new(left),
                right: Box::new(right),
            }));
            next_order += 1;
        }
    }

    /// Wrap an already-shaped root (used when parsing frames).
    pub(crate) fn from_root(root: Node) -> Self {
        let node_count = root.count();
        Self {
            node_count,
            leaf_count: (node_count + 1) / 2,
            root,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Total nodes, leaves and internal. Always `2 * leaf_count - 1`.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Modelled cost of transmitting the tree, `NODE_SIZE_BITS` per node.
    pub fn size_bits(&self) -> usize {
        self.node_count * NODE_SIZE_BITS
    }

    /// Leaf symbols in left-to-right order.
    pub fn symbols(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.leaf_count);
        self.root.collect_symbols(&mut out);
        out
    }
}

impl fmt::Display for CodeTree {
    /// Indented preorder dump: leaves print their quoted symbol, internal nodes `*`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, indent: usize) -> fmt::Result {
            write!(f, "{}", "  ".repeat(indent))?;
            match node.symbol() {
                Some(symbol) => write!(f, "{:?}", symbol)?,
                None => f.write_str("*")?,
            }
            writeln!(f, " ({})", node.frequency())?;
            if let Node::Internal { left, right, .. } = node {
                write_node(f, left, indent + 1)?;
                write_node(f, right, indent + 1)?;
            }
            Ok(())
        }
        write_node(f, &self.root, 0)
    }
}
