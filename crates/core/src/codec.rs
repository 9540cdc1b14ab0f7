//! A built tree, its code table and an encode mode, kept together.
//!
//! Building a tree is the expensive, once-per-alphabet step. A [`Codec`]
//! owns the result and is then reused read-only for any number of
//! transmissions, including from several threads at once.

use crate::alphabet::Alphabet;
use crate::bitstream::Bitstream;
use crate::codes::CodeTable;
use crate::decoder;
use crate::encoder::{self, EncodeMode};
use crate::error::Result;
use crate::evaluate::{self, Evaluation};
use crate::noise::{self, Corruption};
use crate::tree::CodeTree;

#[derive(Debug, Clone)]
pub struct Codec {
    tree: CodeTree,
    table: CodeTable,
    mode: EncodeMode,
}

/// Everything produced by one [`Codec::transmit`] call.
#[derive(Debug, Clone)]
pub struct Transmission {
    /// Clean encoder output
    pub encoded: Bitstream,

    /// Payload after the noise model
    pub corruption: Corruption,

    /// Decoder output for the corrupted payload
    pub decoded: String,

    pub evaluation: Evaluation,
}

impl Codec {
    /// Build the tree and table for `alphabet`.
    pub fn new(alphabet: &Alphabet, mode: EncodeMode) -> Result<Self> {
        let tree = CodeTree::build(alphabet)?;
        Ok(Self::from_tree(tree, mode))
    }

    /// Wrap an existing tree (e.g., one parsed from a frame).
    pub fn from_tree(tree: CodeTree, mode: EncodeMode) -> Self {
        let table = CodeTable::derive(&tree);
        Self { tree, table, mode }
    }

    pub fn tree(&self) -> &CodeTree {
        &self.tree
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn mode(&self) -> EncodeMode {
        self.mode
    }

    pub fn encode(&self, text: &str) -> Result<Bitstream> {
        encoder::encode(text, &self.table, self.mode)
    }

    pub fn decode(&self, bits: &Bitstream) -> String {
        decoder::decode(bits, &self.tree)
    }

    /// Encode `text`, corrupt it at `level` with `seed`, decode and score.
    pub fn transmit(&self, text: &str, level: u8, seed: u64) -> Result<Transmission> {
        let encoded = self.encode(text)?;
        let corruption = noise::corrupt(&encoded, level, seed)?;
        let decoded = self.decode(&corruption.bits);
        let evaluation =
            evaluate::evaluate(text, &decoded, &encoded, &corruption.bits, &self.tree);

        Ok(Transmission {
            encoded,
            corruption,
            decoded,
            evaluation,
        })
    }
}
