//! Bit-flip noise model.
//!
//! Simulates a noisy channel by inverting an exact number of bits chosen at
//! random. For a stream of length `L` at level `l` (percent), exactly
//! `k = floor(L * l / 100)` distinct positions are drawn uniformly without
//! replacement and each one is flipped, so the output differs from the input
//! in exactly `k` positions.
//!
//! # Determinism
//!
//! All randomness comes from a ChaCha8 RNG seeded by the caller. The same
//! seed, level and input always produce the same corruption, and no global
//! RNG state is touched, so concurrent callers never interfere.

use crate::bitstream::Bitstream;
use crate::error::{NoiseError, Result};
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Highest accepted corruption level, in percent.
pub const MAX_LEVEL: u8 = 100;

/// The result of corrupting a bitstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corruption {
    /// The corrupted stream
    pub bits: Bitstream,

    /// Flipped positions, in draw order
    pub flipped: Vec<usize>,
}

/// Number of bits flipped for a stream of `len` bits at `level` percent.
pub fn flip_count(len: usize, level: u8) -> usize {
    len * level as usize / 100
}

/// Corrupt `bits` at `level` percent using a ChaCha8 RNG seeded with `seed`.
///
/// # Errors
/// `NoiseError::InvalidCorruptionLevel` if `level > 100`.
pub fn corrupt(bits: &Bitstream, level: u8, seed: u64) -> Result<Corruption> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    corrupt_with_rng(bits, level, &mut rng)
}

/// Corrupt `bits` drawing positions from a caller-owned RNG.
///
/// # Errors
/// `NoiseError::InvalidCorruptionLevel` if `level > 100`.
pub fn corrupt_with_rng<R: Rng + ?Sized>(
    bits: &Bitstream,
    level: u8,
    rng: &mut R,
) -> Result<Corruption> {
    if level > MAX_LEVEL {
        return Err(NoiseError::InvalidCorruptionLevel(level).into());
    }

    let amount = flip_count(bits.len(), level);
    let flipped = index::sample(rng, bits.len(), amount).into_vec();

    let mut corrupted = bits.clone();
    for &position in &flipped {
        corrupted.flip(position);
    }

    Ok(Corruption {
        bits: corrupted,
        flipped,
    })
}
