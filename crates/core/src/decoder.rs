//! Bitstream -> text decoding by walking the code tree.
//!
//! Starting at the root, `0` moves left and `1` moves right. Reaching a leaf
//! appends its symbol and resets the cursor to the root. One algorithm covers
//! both encoder modes, since greedy n-gram output is still a concatenation
//! of tree code words.
//!
//! # Damaged input
//!
//! Decoding never fails. Symbols are emitted only when a leaf is reached, so
//! bits left over at the end that do not complete a path are dropped. For a
//! single-leaf tree, `0` is the only path; a `1` is unreachable and is
//! skipped with the cursor reset.

use crate::bitstream::Bitstream;
use crate::tree::{CodeTree, Node};

/// Decode `bits` against `tree`.
pub fn decode(bits: &Bitstream, tree: &CodeTree) -> String {
    let root = tree.root();
    let mut out = String::new();

    if let Node::Leaf { symbol, .. } = root {
        for bit in bits.iter() {
            if !bit {
                out.push_str(symbol);
            }
        }
        return out;
    }

    let mut cursor = root;
    for bit in bits.iter() {
        // Internal nodes always have both children; the fallback only
        // resets on a malformed cursor.
        cursor = cursor.child(bit).unwrap_or(root);

        if let Node::Leaf { symbol, .. } = cursor {
            out.push_str(symbol);
            cursor = root;
        }
    }

    out
}
