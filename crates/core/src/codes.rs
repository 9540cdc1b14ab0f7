//! Code table derivation: symbol -> code word.
//!
//! A [`CodeTable`] is built once from a [`CodeTree`] by depth-first traversal,
//! appending `0` for every left edge and `1` for every right edge and
//! recording the accumulated path at each leaf. Since internal nodes never
//! carry symbols, no code word is a prefix of another and each code's length
//! equals its leaf depth.
//!
//! The one exception is the single-leaf tree, whose leaf sits at depth 0:
//! it is assigned the code `0`.

use crate::alphabet::Alphabet;
use crate::bitstream::Bitstream;
use crate::tree::{CodeTree, Node};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct CodeTable {
    codes: BTreeMap<String, Bitstream>,
    /// Longest symbol, in characters (drives greedy matching)
    max_symbol_len: usize,
}

impl CodeTable {
    /// Derive the table for `tree`.
    pub fn derive(tree: &CodeTree) -> Self {
        let mut codes = BTreeMap::new();

        match tree.root() {
            Node::Leaf { symbol, .. } => {
                codes.insert(symbol.clone(), Bitstream::from(vec![false]));
            }
            root => collect(root, &mut Vec::new(), &mut codes),
        }

        let max_symbol_len = codes.keys().map(|s| s.chars().count()).max().unwrap_or(0);

        Self {
            codes,
            max_symbol_len,
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&Bitstream> {
        self.codes.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.codes.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn max_symbol_len(&self) -> usize {
        self.max_symbol_len
    }

    /// Entries in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Bitstream)> {
        self.codes.iter().map(|(s, c)| (s.as_str(), c))
    }

    /// Check that no code word is a prefix of another.
    ///
    /// Quadratic; meant for tests and diagnostics.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Bitstream> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }

    /// Frequency-weighted mean code length in bits.
    ///
    /// Symbols of `alphabet` missing from the table are ignored. Returns 0.0
    /// when the covered weight is zero.
    pub fn average_code_length(&self, alphabet: &Alphabet) -> f64 {
        let (weighted, total) = alphabet
            .entries()
            .iter()
            .filter_map(|e| self.get(&e.symbol).map(|code| (e.frequency, code.len())))
            .fold((0.0, 0.0), |(weighted, total), (freq, len)| {
                (weighted + freq * len as f64, total + freq)
            });

        if total == 0.0 {
            0.0
        } else {
            weighted / total
        }
    }
}

fn collect(node: &Node, path: &mut Vec<bool>, codes: &mut BTreeMap<String, Bitstream>) {
    match node {
        Node::Leaf { symbol, .. } => {
            codes.insert(symbol.clone(), Bitstream::from(path.clone()));
        }
        Node::Internal { left, right, .. } => {
            path.push(false);
            collect(left, path, codes);
            path.pop();

            path.push(true);
            collect(right, path, codes);
            path.pop();
        }
    }
}
