//! Error types for the huffsim codec and its outer layers.
//!
//! All operations return structured errors rather than panicking. Policy
//! conditions (truncated bitstreams during decode, zero-length payloads in
//! ratio accounting) are not errors and never show up here.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Alphabet: frequency table validation before a tree is built
/// - Encode: input text that the code table cannot represent
/// - Noise: invalid corruption parameters
/// - Bit I/O: parsing or packing bitstreams
/// - Framing / CRC: serialized tree frames
/// - I/O and config: the outer driver layers
#[derive(Debug, Error)]
pub enum Error {
    /// Alphabet validation failed (e.g., no symbols to build a tree from)
    #[error("alphabet error: {0}")]
    Alphabet(#[from] AlphabetError),

    /// Encoding failed because the input contains an uncoded symbol
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Noise model parameters are out of range
    #[error("noise model error: {0}")]
    Noise(#[from] NoiseError),

    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Tree frame error (e.g., invalid header, malformed shape)
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// CRC validation failed, indicating a damaged frame
    #[error("CRC mismatch: expected {expected:#010x}, got {actual:#010x}")]
    Crc { expected: u32, actual: u32 },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Alphabet validation errors, raised once at builder entry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AlphabetError {
    /// No symbols at all
    #[error("empty alphabet: cannot build a code tree")]
    Empty,

    /// A symbol with zero characters
    #[error("symbol at index {index} is empty")]
    EmptySymbol { index: usize },

    /// Negative, NaN or infinite frequency
    #[error("symbol {symbol:?} has invalid frequency {frequency}")]
    InvalidFrequency { symbol: String, frequency: f64 },

    /// The same symbol appears twice
    #[error("duplicate symbol {symbol:?}")]
    DuplicateSymbol { symbol: String },
}

/// Encoder errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A character (or n-gram) in the input has no code word
    #[error("no code for symbol {symbol:?} at character position {position}")]
    MissingCode { symbol: String, position: usize },
}

/// Noise model errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NoiseError {
    /// Corruption level outside [0, 100]
    #[error("invalid corruption level {0}: must be within 0..=100")]
    InvalidCorruptionLevel(u8),
}

/// Bit-level I/O errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Textual bitstream contained something other than '0' or '1'
    #[error("invalid bit character {found:?} at position {position}")]
    InvalidBitChar { found: char, position: usize },
}

/// Tree frame errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FramingError {
    /// Invalid magic number in header
    #[error("invalid magic number: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: [u8; 4], actual: [u8; 4] },

    /// Frame is too short to contain a valid header
    #[error("frame too short: need at least {required} bytes, got {actual}")]
    FrameTooShort { required: usize, actual: usize },

    /// Body length doesn't match what the header announces
    #[error("frame length mismatch: header implies {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Preorder shape bits do not describe a full binary tree
    #[error("malformed tree shape at node {node}")]
    MalformedShape { node: usize },

    /// Leaf symbol is empty or not valid UTF-8
    #[error("invalid symbol in leaf table at byte offset {offset}")]
    InvalidSymbol { offset: usize },

    /// Symbol does not fit the u16 length prefix
    #[error("symbol of {len} bytes exceeds the {max} byte frame limit")]
    SymbolTooLong { len: usize, max: usize },

    /// Node or payload count does not fit a u32 header field
    #[error("{field} value {value} does not fit the frame header")]
    HeaderOverflow { field: &'static str, value: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
