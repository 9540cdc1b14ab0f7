//! MSB-first bit packing for bitstreams and tree shapes.
//!
//! The codec itself works on [`Bitstream`](crate::bitstream::Bitstream), one
//! `bool` per bit. Packing only happens at the frame boundary, where bits are
//! laid out eight to a byte, first bit in the most significant position.
//!
//! # Padding Rules
//! - BitWriter: pads the final partial byte with trailing zeros
//! - BitReader: cannot tell padding from data; the caller supplies the exact
//!   bit count it expects to read
//!
//! # Example
//! ```
//! use huffsim_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! for bit in [true, false, true, true, true] {
//!     writer.write_bit(bit);
//! }
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::new(&bytes);
//! assert!(reader.read_bit().unwrap());
//! assert!(!reader.read_bit().unwrap());
//! ```

use crate::error::{BitIoError, Result};

/// Packs bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8 between calls
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer sized for `bits` bits.
    pub fn with_bit_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Append one bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 0x80 >> self.bit_count;
        }
        self.bit_count += 1;

        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Append every bit yielded by `bits`, in order.
    pub fn write_all<I>(&mut self, bits: I)
    where
        I: IntoIterator<Item = bool>,
    {
        for bit in bits {
            self.write_bit(bit);
        }
    }

    /// Finish writing and return the packed bytes, zero padded.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        self.bytes
    }

    /// Total number of bits written (including the partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }
}

/// Reads bits MSB-first from a byte buffer.
///
/// # Invariants
/// - `bit_position` never exceeds `data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_position: 0,
        }
    }

    /// Read a single bit.
    ///
    /// # Errors
    /// `BitIoError::UnexpectedEof` once every byte has been consumed.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.is_empty() {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let byte = self.data[self.bit_position / 8];
        let bit = byte & (0x80 >> (self.bit_position % 8)) != 0;
        self.bit_position += 1;
        Ok(bit)
    }

    /// Read exactly `count` bits into a vector.
    ///
    /// # Errors
    /// `BitIoError::UnexpectedEof` if fewer than `count` bits remain; nothing
    /// is consumed in that case.
    pub fn read_bits(&mut self, count: usize) -> Result<Vec<bool>> {
        if count > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }
        (0..count).map(|_| self.read_bit()).collect()
    }

    /// Number of bits left in the buffer, padding included.
    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.bit_position
    }

    pub fn position(&self) -> usize {
        self.bit_position
    }

    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.data.len() * 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(bits: &[u8]) -> Vec<u8> {
        let mut writer = BitWriter::new();
        writer.write_all(bits.iter().map(|&b| b == 1));
        writer.finish()
    }

    #[test]
    fn test_full_byte() {
        assert_eq!(write(&[1, 0, 1, 1, 0, 0, 1, 1]), vec![0b10110011]);
    }

    #[test]
    fn test_padding() {
        assert_eq!(write(&[1]), vec![0b1000_0000]);
        assert_eq!(write(&[]), Vec::<u8>::new());
    }

    #[test]
    fn test_multi_byte() {
        let bits = [1, 0, 1, 0, 1, 0, 1, 1, 1, 1, 1, 1];
        assert_eq!(write(&bits), vec![0b10101011, 0b11110000]);
    }

    #[test]
    fn test_bit_len_tracks_partial_byte() {
        let mut writer = BitWriter::with_bit_capacity(20);
        writer.write_all([true; 11]);
        assert_eq!(writer.bit_len(), 11);
    }

    #[test]
    fn test_read_back() {
        let bytes = write(&[0, 1, 1, 0, 1]);
        let mut reader = BitReader::new(&bytes);
        let bits = reader.read_bits(5).unwrap();
        assert_eq!(bits, vec![false, true, true, false, true]);
        assert_eq!(reader.position(), 5);
        assert_eq!(reader.bits_remaining(), 3);
    }

    #[test]
    fn test_read_past_end() {
        let data = vec![0b10101010];
        let mut reader = BitReader::new(&data);

        assert!(reader.read_bits(9).is_err());
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_bits(8).unwrap().len(), 8);
        assert!(reader.is_empty());
        assert!(reader.read_bit().is_err());
    }
}
