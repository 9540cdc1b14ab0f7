//! huffsim-core: Huffman codes over character and n-gram alphabets, with a
//! bit-flip noise model for measuring how well they survive a bad channel.
//!
//! This library provides:
//! - Deterministic Huffman tree construction from a validated alphabet
//! - Prefix-free code tables and fixed / greedy longest-match encoding
//! - Tree-walk decoding that tolerates truncated and corrupted input
//! - A seeded noise model flipping an exact number of bits
//! - Edit distance, word error rate and compression-ratio accounting
//!
//! # Architecture
//!
//! Leaf-first:
//! - `alphabet`: validated (symbol, frequency) entries
//! - `frequency`: character and n-gram frequency models over raw text
//! - `tree`: the code tree builder
//! - `codes`: symbol -> code word table
//! - `bitstream` / `bitio`: bit sequences and MSB-first byte packing
//! - `encoder` / `decoder`: text <-> bits
//! - `codec`: tree + table + mode, built once and shared
//! - `noise`: seeded bit flipping
//! - `evaluate`: per-transmission metrics
//! - `framing`: tree + payload frame with CRC32
//! - `harness` / `metrics`: parallel trial batches and their aggregates
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Deterministic**: Equal inputs build equal trees; seeded noise is reproducible
//! - **Immutable after build**: Trees, tables and codecs are `Send + Sync`
//!
//! # Example
//!
//! ```
//! use huffsim_core::{Alphabet, Codec, EncodeMode};
//!
//! let alphabet = Alphabet::from_counts([("a", 5), ("b", 9), ("c", 12)]).unwrap();
//! let codec = Codec::new(&alphabet, EncodeMode::Fixed).unwrap();
//!
//! let bits = codec.encode("abc").unwrap();
//! assert_eq!(codec.decode(&bits), "abc");
//! ```

pub mod alphabet;
pub mod bitio;
pub mod bitstream;
pub mod codec;
pub mod codes;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod evaluate;
pub mod framing;
pub mod frequency;
pub mod harness;
pub mod metrics;
pub mod noise;
pub mod tree;

// Re-export commonly used types
pub use alphabet::{Alphabet, FrequencyEntry};
pub use bitstream::Bitstream;
pub use codec::{Codec, Transmission};
pub use codes::CodeTable;
pub use encoder::EncodeMode;
pub use error::{Error, Result};
pub use evaluate::Evaluation;
pub use frequency::FrequencyConfig;
pub use harness::{Trial, TrialPlan};
pub use metrics::{TrialOutcome, TrialSummary};
pub use noise::Corruption;
pub use tree::CodeTree;
