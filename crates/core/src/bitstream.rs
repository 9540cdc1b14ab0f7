//! The bitstream type passed between encoder, noise model and decoder.
//!
//! A [`Bitstream`] is an ordered, finite sequence of bits addressed by index.
//! Its interchange form is a string over `{'0', '1'}` ([`Display`] and
//! [`FromStr`]); its storage form is MSB-first packed bytes plus an exact
//! bit count ([`Bitstream::to_bytes`] / [`Bitstream::from_bytes`]).
//!
//! [`Display`]: std::fmt::Display
//! [`FromStr`]: std::str::FromStr

use crate::bitio::{BitReader, BitWriter};
use crate::error::{BitIoError, Error, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bitstream {
    bits: Vec<bool>,
}

impl Bitstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Vec::with_capacity(bits),
        }
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Append another bitstream (used to concatenate code words).
    pub fn extend_from(&mut self, other: &Bitstream) {
        self.bits.extend_from_slice(&other.bits);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Invert the bit at `index`. Out-of-range indices are ignored.
    pub fn flip(&mut self, index: usize) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = !*bit;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// True if `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Bitstream) -> bool {
        other.bits.starts_with(&self.bits)
    }

    /// Number of positions at which two equal-length streams differ.
    ///
    /// Streams of different length compare over their common prefix.
    pub fn hamming_distance(&self, other: &Bitstream) -> usize {
        self.iter().zip(other.iter()).filter(|(a, b)| a != b).count()
    }

    /// Pack into MSB-first bytes, zero padded to a byte boundary.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BitWriter::with_bit_capacity(self.len());
        writer.write_all(self.iter());
        writer.finish()
    }

    /// Unpack exactly `bit_len` bits from MSB-first bytes.
    ///
    /// # Errors
    /// `BitIoError::UnexpectedEof` if `bytes` holds fewer than `bit_len` bits.
    pub fn from_bytes(bytes: &[u8], bit_len: usize) -> Result<Self> {
        let mut reader = BitReader::new(bytes);
        Ok(Self {
            bits: reader.read_bits(bit_len)?,
        })
    }
}

impl From<Vec<bool>> for Bitstream {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromIterator<bool> for Bitstream {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Bitstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Bitstream {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .enumerate()
            .map(|(position, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                found => Err(BitIoError::InvalidBitChar { found, position }.into()),
            })
            .collect()
    }
}
