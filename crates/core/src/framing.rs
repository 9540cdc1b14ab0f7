//! Tree + payload frame serialization and parsing.
//!
//! A frame packages a code tree together with an encoded payload so the pair
//! can be stored or moved across a process boundary and decoded later with
//! exactly the same tree.
//!
//! # Frame Format
//!
//! ```text
//! +---------------------+
//! | Magic (4 bytes)     |  0x48 0x54 0x52 0x45 ("HTRE")
//! +---------------------+
//! | node_count (4)      |  u32 nodes in the tree (leaves + internal)
//! +---------------------+
//! | leaf_table_len (4)  |  u32 bytes of leaf table
//! +---------------------+
//! | payload_bits (4)    |  u32 exact payload length in bits
//! +---------------------+
//! | crc32 (4)           |  u32 checksum of everything below the magic
//! +---------------------+
//! | shape               |  node_count bits, preorder, 1 = leaf, 0 = internal
//! | (variable)          |  packed MSB-first, zero padded
//! +---------------------+
//! | leaf table          |  per leaf, preorder:
//! | (variable)          |    u16 symbol byte length, UTF-8 bytes, f64 frequency
//! +---------------------+
//! | payload             |  payload_bits bits, packed MSB-first, zero padded
//! | (variable)          |
//! +---------------------+
//! ```
//!
//! All integers are little-endian. Internal node frequencies are not stored;
//! they are recomputed as the sum of their children. Tie-break tags are
//! reassigned in preorder on parse, which changes nothing about the codes.
//!
//! Shapes nested deeper than [`MAX_TREE_DEPTH`] are rejected as malformed.
//! Huffman trees over f64 frequencies never get near that depth.
//!
//! # CRC Coverage
//!
//! The CRC32 covers node_count, leaf_table_len, payload_bits, the shape
//! bytes, the leaf table and the payload bytes.

use crate::bitio::{BitReader, BitWriter};
use crate::bitstream::Bitstream;
use crate::error::{Error, FramingError, Result};
use crate::tree::{CodeTree, Node};

/// Magic number for tree frames: "HTRE"
const MAGIC: [u8; 4] = [0x48, 0x54, 0x52, 0x45];

/// Size of the frame header in bytes
pub const HEADER_SIZE: usize = 20;

/// Longest symbol a frame can carry, in bytes
pub const MAX_SYMBOL_BYTES: usize = u16::MAX as usize;

/// Deepest leaf a parsed frame may contain
pub const MAX_TREE_DEPTH: usize = 2048;

/// A parsed frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The code tree, rebuilt node for node
    pub tree: CodeTree,

    /// The encoded payload, exact length
    pub payload: Bitstream,

    /// CRC32 checksum (validated)
    pub crc32: u32,
}

/// Serialize a tree and payload into a frame.
///
/// # Errors
/// - `FramingError::SymbolTooLong` for a symbol over `MAX_SYMBOL_BYTES`
/// - `FramingError::HeaderOverflow` if a count does not fit in a u32
pub fn serialize_frame(tree: &CodeTree, payload: &Bitstream) -> Result<Vec<u8>> {
    let mut shape = BitWriter::with_bit_capacity(tree.node_count());
    let mut leaf_table = Vec::new();
    write_node(tree.root(), &mut shape, &mut leaf_table)?;
    let shape = shape.finish();
    let payload_bytes = payload.to_bytes();

    let node_count = header_u32("node_count", tree.node_count())?;
    let leaf_table_len = header_u32("leaf_table_len", leaf_table.len())?;
    let payload_bits = header_u32("payload_bits", payload.len())?;

    let crc32 = compute_crc(
        node_count,
        leaf_table_len,
        payload_bits,
        &shape,
        &leaf_table,
        &payload_bytes,
    );

    let total_size = HEADER_SIZE + shape.len() + leaf_table.len() + payload_bytes.len();
    let mut frame = Vec::with_capacity(total_size);

    frame.extend_from_slice(&MAGIC);
    frame.extend_from_slice(&node_count.to_le_bytes());
    frame.extend_from_slice(&leaf_table_len.to_le_bytes());
    frame.extend_from_slice(&payload_bits.to_le_bytes());
    frame.extend_from_slice(&crc32.to_le_bytes());

    frame.extend_from_slice(&shape);
    frame.extend_from_slice(&leaf_table);
    frame.extend_from_slice(&payload_bytes);

    Ok(frame)
}

/// Parse a frame from bytes.
///
/// # Errors
/// - `FramingError::FrameTooShort` if the buffer cannot hold a header
/// - `FramingError::InvalidMagic` if the magic number doesn't match
/// - `FramingError::LengthMismatch` if the body size disagrees with the header
/// - `Error::Crc` if the checksum fails
/// - `FramingError::MalformedShape` / `InvalidSymbol` for a bad tree body
pub fn parse_frame(bytes: &[u8]) -> Result<Frame> {
    if bytes.len() < HEADER_SIZE {
        return Err(FramingError::FrameTooShort {
            required: HEADER_SIZE,
            actual: bytes.len(),
        }
        .into());
    }

    let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
    if magic != MAGIC {
        return Err(FramingError::InvalidMagic {
            expected: MAGIC,
            actual: magic,
        }
        .into());
    }

    let node_count = read_u32(bytes, 4);
    let leaf_table_len = read_u32(bytes, 8);
    let payload_bits = read_u32(bytes, 12);
    let crc32 = read_u32(bytes, 16);

    let shape_len = (node_count as usize).div_ceil(8);
    let payload_len = (payload_bits as usize).div_ceil(8);
    let expected_size = HEADER_SIZE + shape_len + leaf_table_len as usize + payload_len;
    if bytes.len() != expected_size {
        return Err(FramingError::LengthMismatch {
            expected: expected_size,
            actual: bytes.len(),
        }
        .into());
    }

    let shape_start = HEADER_SIZE;
    let table_start = shape_start + shape_len;
    let payload_start = table_start + leaf_table_len as usize;

    let shape = &bytes[shape_start..table_start];
    let leaf_table = &bytes[table_start..payload_start];
    let payload_bytes = &bytes[payload_start..];

    let computed_crc = compute_crc(
        node_count,
        leaf_table_len,
        payload_bits,
        shape,
        leaf_table,
        payload_bytes,
    );
    if computed_crc != crc32 {
        return Err(Error::Crc {
            expected: crc32,
            actual: computed_crc,
        });
    }

    let mut parser = TreeParser {
        shape: BitReader::new(shape),
        node_count: node_count as usize,
        leaf_table,
        offset: 0,
    };
    let root = parser.parse_node(0)?;
    parser.finish()?;

    Ok(Frame {
        tree: CodeTree::from_root(root),
        payload: Bitstream::from_bytes(payload_bytes, payload_bits as usize)?,
        crc32,
    })
}

fn write_node(node: &Node, shape: &mut BitWriter, leaf_table: &mut Vec<u8>) -> Result<()> {
    match node {
        Node::Leaf {
            symbol, frequency, ..
        } => {
            shape.write_bit(true);

            let len = u16::try_from(symbol.len()).map_err(|_| FramingError::SymbolTooLong {
                len: symbol.len(),
                max: MAX_SYMBOL_BYTES,
            })?;
            leaf_table.extend_from_slice(&len.to_le_bytes());
            leaf_table.extend_from_slice(symbol.as_bytes());
            leaf_table.extend_from_slice(&frequency.to_le_bytes());
        }
        Node::Internal { left, right, .. } => {
            shape.write_bit(false);
            write_node(left, shape, leaf_table)?;
            write_node(right, shape, leaf_table)?;
        }
    }
    Ok(())
}

/// Rebuilds a tree from preorder shape bits and the leaf table.
struct TreeParser<'a> {
    shape: BitReader<'a>,
    node_count: usize,
    leaf_table: &'a [u8],
    offset: usize,
}

impl<'a> TreeParser<'a> {
    fn parse_node(&mut self, depth: usize) -> Result<Node> {
        let order = self.shape.position();
        if order >= self.node_count || depth > MAX_TREE_DEPTH {
            return Err(FramingError::MalformedShape { node: order }.into());
        }

        if self.shape.read_bit()? {
            let (symbol, frequency) = self.read_leaf()?;
            Ok(Node::Leaf {
                symbol,
                frequency,
                order,
            })
        } else {
            let left = self.parse_node(depth + 1)?;
            let right = self.parse_node(depth + 1)?;
            Ok(Node::Internal {
                frequency: left.frequency() + right.frequency(),
                order,
                left: Box::new(left),
                right: Box::new(right),
            })
        }
    }

    fn read_leaf(&mut self) -> Result<(String, f64)> {
        let start = self.offset;
        let invalid = || FramingError::InvalidSymbol { offset: start };

        let len_bytes = self.take(2).ok_or_else(invalid)?;
        let len = u16::from_le_bytes([len_bytes[0], len_bytes[1]]) as usize;
        if len == 0 {
            return Err(invalid().into());
        }

        let symbol_bytes = self.take(len).ok_or_else(invalid)?;
        let symbol = std::str::from_utf8(symbol_bytes)
            .map_err(|_| invalid())?
            .to_string();

        let freq_bytes = self.take(8).ok_or_else(invalid)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(freq_bytes);
        let frequency = f64::from_le_bytes(raw);

        Ok((symbol, frequency))
    }

    fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        let slice = self.leaf_table.get(self.offset..self.offset + len)?;
        self.offset += len;
        Some(slice)
    }

    /// Every announced node and every leaf table byte must be consumed.
    fn finish(&self) -> Result<()> {
        if self.shape.position() != self.node_count {
            return Err(FramingError::MalformedShape {
                node: self.shape.position(),
            }
            .into());
        }
        if self.offset != self.leaf_table.len() {
            return Err(FramingError::LengthMismatch {
                expected: self.offset,
                actual: self.leaf_table.len(),
            }
            .into());
        }
        Ok(())
    }
}

fn header_u32(field: &'static str, value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| FramingError::HeaderOverflow { field, value }.into())
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Compute CRC32 over the protected fields.
fn compute_crc(
    node_count: u32,
    leaf_table_len: u32,
    payload_bits: u32,
    shape: &[u8],
    leaf_table: &[u8],
    payload: &[u8],
) -> u32 {
    let mut hasher = crc32fast::Hasher::new();

    hasher.update(&node_count.to_le_bytes());
    hasher.update(&leaf_table_len.to_le_bytes());
    hasher.update(&payload_bits.to_le_bytes());

    hasher.update(shape);
    hasher.update(leaf_table);
    hasher.update(payload);

    hasher.finalize()
}
