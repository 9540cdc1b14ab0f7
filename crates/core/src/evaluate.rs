//! Resilience and compression metrics for one transmission.
//!
//! [`evaluate`] scores an (original, decoded) pair together with the clean
//! and received payloads and the tree that produced them.
//!
//! # Compression ratio
//!
//! Two ratios are reported:
//! - `raw_compression_ratio`: original bits / encoded bits, where the original
//!   costs 8 bits per character. Above 1 means the payload is smaller.
//! - `compression_ratio`: the raw ratio folded into `(0, 1]` by taking its
//!   reciprocal when it exceeds 1. This no longer says which side is larger;
//!   it measures how close the payload is to a 1:1 size.
//!
//! Both are 0.0 when the encoded payload is empty.
//!
//! # Distances
//!
//! Edit distance is classic Levenshtein (unit-cost insert, delete,
//! substitute) over a full DP matrix. The word error rate is the same
//! distance over whitespace-separated words, reported as a count of word
//! edits.
//!
//! Channel bit errors are a Hamming count. Noise flips bits in place and
//! never changes the payload length, so this is exactly the number of flips.

use crate::bitstream::Bitstream;
use crate::tree::CodeTree;

/// Bits charged per character of uncompressed text.
pub const BITS_PER_CHAR: usize = 8;

/// Metrics for one encode -> (corrupt) -> decode pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Original text at `BITS_PER_CHAR` per character
    pub original_size_bits: usize,

    /// Length of the clean encoded payload
    pub encoded_size_bits: usize,

    /// Modelled size of the code tree
    pub tree_size_bits: usize,

    /// Payload plus tree
    pub total_size_bits: usize,

    /// Ratio folded into (0, 1]
    pub compression_ratio: f64,

    /// original / encoded, unfolded
    pub raw_compression_ratio: f64,

    /// Percentage of original bits saved by the payload (negative on expansion)
    pub space_saving_percent: f64,

    /// Character-level Levenshtein distance, original vs decoded
    pub edit_distance: usize,

    /// Word-level Levenshtein distance, original vs decoded
    pub word_error_rate: usize,

    /// Positions where the received payload differs from the clean one
    pub channel_bit_errors: usize,
}

/// Score one transmission.
///
/// `original_bits` is the clean encoder output; `received_bits` is what the
/// decoder actually saw (identical when no noise was applied).
pub fn evaluate(
    original_text: &str,
    decoded_text: &str,
    original_bits: &Bitstream,
    received_bits: &Bitstream,
    tree: &CodeTree,
) -> Evaluation {
    let original_size_bits = original_text.chars().count() * BITS_PER_CHAR;
    let encoded_size_bits = original_bits.len();
    let tree_size_bits = tree.size_bits();
    let raw = raw_compression_ratio(original_size_bits, encoded_size_bits);

    Evaluation {
        original_size_bits,
        encoded_size_bits,
        tree_size_bits,
        total_size_bits: encoded_size_bits + tree_size_bits,
        compression_ratio: normalize_ratio(raw),
        raw_compression_ratio: raw,
        space_saving_percent: space_saving_percent(original_size_bits, encoded_size_bits),
        edit_distance: char_edit_distance(original_text, decoded_text),
        word_error_rate: word_error_rate(original_text, decoded_text),
        channel_bit_errors: original_bits.hamming_distance(received_bits),
    }
}

/// `original / encoded`, or 0.0 for an empty payload.
pub fn raw_compression_ratio(original_bits: usize, encoded_bits: usize) -> f64 {
    if encoded_bits == 0 {
        0.0
    } else {
        original_bits as f64 / encoded_bits as f64
    }
}

/// Fold a ratio above 1 to its reciprocal.
pub fn normalize_ratio(ratio: f64) -> f64 {
    if ratio > 1.0 {
        1.0 / ratio
    } else {
        ratio
    }
}

/// `(1 - encoded / original) * 100`, or 0.0 for an empty original.
pub fn space_saving_percent(original_bits: usize, encoded_bits: usize) -> f64 {
    if original_bits == 0 {
        0.0
    } else {
        (1.0 - encoded_bits as f64 / original_bits as f64) * 100.0
    }
}

/// Levenshtein distance between two sequences.
///
/// Builds the full `(a.len() + 1) x (b.len() + 1)` matrix.
pub fn edit_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let cols = b.len() + 1;
    let mut matrix = vec![0usize; (a.len() + 1) * cols];

    for i in 0..=a.len() {
        matrix[i * cols] = i;
    }
    for j in 0..=b.len() {
        matrix[j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let at = i * cols + j;
            matrix[at] = if a[i - 1] == b[j - 1] {
                matrix[at - cols - 1]
            } else {
                let substitution = matrix[at - cols - 1];
                let deletion = matrix[at - cols];
                let insertion = matrix[at - 1];
                1 + substitution.min(deletion).min(insertion)
            };
        }
    }

    matrix[a.len() * cols + b.len()]
}

/// Character-level edit distance.
pub fn char_edit_distance(original: &str, decoded: &str) -> usize {
    let a: Vec<char> = original.chars().collect();
    let b: Vec<char> = decoded.chars().collect();
    edit_distance(&a, &b)
}

/// Word-level edit distance over whitespace-split tokens.
pub fn word_error_rate(original: &str, decoded: &str) -> usize {
    let a: Vec<&str> = original.split_whitespace().collect();
    let b: Vec<&str> = decoded.split_whitespace().collect();
    edit_distance(&a, &b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::codes::CodeTable;
    use crate::decoder::decode;
    use crate::encoder::encode_fixed;
    use crate::noise::corrupt;

    #[test]
    fn test_classic_distances() {
        assert_eq!(char_edit_distance("kitten", "sitting"), 3);
        assert_eq!(char_edit_distance("kyou mo kawaii", "kyou mo kowai"), 2);
        assert_eq!(char_edit_distance("", "abc"), 3);
        assert_eq!(char_edit_distance("abc", ""), 3);
        assert_eq!(char_edit_distance("same", "same"), 0);
    }

    #[test]
    fn test_distance_counts_chars_not_bytes() {
        assert_eq!(char_edit_distance("héllo", "hello"), 1);
    }

    #[test]
    fn test_word_error_rate() {
        assert_eq!(word_error_rate("the quick brown fox", "the quick brown fox"), 0);
        assert_eq!(word_error_rate("the quick brown fox", "the quack brown"), 2);
        assert_eq!(word_error_rate("a  b\tc", "a b c"), 0);
        assert_eq!(word_error_rate("", "one two"), 2);
    }

    #[test]
    fn test_ratios() {
        assert_eq!(raw_compression_ratio(48, 22), 48.0 / 22.0);
        assert!((normalize_ratio(48.0 / 22.0) - 22.0 / 48.0).abs() < 1e-12);
        assert_eq!(normalize_ratio(0.5), 0.5);
        assert_eq!(raw_compression_ratio(48, 0), 0.0);
        assert_eq!(normalize_ratio(0.0), 0.0);

        assert_eq!(space_saving_percent(100, 25), 75.0);
        assert_eq!(space_saving_percent(0, 25), 0.0);
    }

    #[test]
    fn test_textbook_evaluation() {
        let alphabet =
            Alphabet::from_counts([("a", 5), ("b", 9), ("c", 12), ("d", 13), ("e", 16), ("f", 45)])
                .unwrap();
        let tree = CodeTree::build(&alphabet).unwrap();
        let table = CodeTable::derive(&tree);

        let bits = encode_fixed("abccba", &table).unwrap();
        let decoded = decode(&bits, &tree);
        let eval = evaluate("abccba", &decoded, &bits, &bits, &tree);

        assert_eq!(decoded, "abccba");
        assert_eq!(eval.original_size_bits, 48);
        assert_eq!(eval.encoded_size_bits, 22);
        assert_eq!(eval.tree_size_bits, 11 * 168);
        assert_eq!(eval.total_size_bits, 22 + 1848);
        assert!((eval.compression_ratio - 22.0 / 48.0).abs() < 1e-12);
        assert_eq!(eval.raw_compression_ratio, 48.0 / 22.0);
        assert_eq!(eval.edit_distance, 0);
        assert_eq!(eval.word_error_rate, 0);
        assert_eq!(eval.channel_bit_errors, 0);
    }

    #[test]
    fn test_noisy_evaluation() {
        let alphabet =
            Alphabet::from_counts([("a", 5), ("b", 9), ("c", 12), ("d", 13), ("e", 16), ("f", 45)])
                .unwrap();
        let tree = CodeTree::build(&alphabet).unwrap();
        let table = CodeTable::derive(&tree);

        let bits = encode_fixed("abccba", &table).unwrap();
        let noisy = corrupt(&bits, 100, 9).unwrap();
        let decoded = decode(&noisy.bits, &tree);
        let eval = evaluate("abccba", &decoded, &bits, &noisy.bits, &tree);

        assert_eq!(eval.encoded_size_bits, 22);
        assert_eq!(eval.channel_bit_errors, 22);
        assert_eq!(eval.edit_distance, char_edit_distance("abccba", &decoded));
    }

    #[test]
    fn test_channel_bit_errors_count_every_flip() {
        let tree = CodeTree::build(&Alphabet::from_counts([("0", 1), ("1", 1)]).unwrap()).unwrap();
        let bits: Bitstream = "0110".parse().unwrap();
        let noisy = corrupt(&bits, 100, 3).unwrap();
        let eval = evaluate("0110", &decode(&noisy.bits, &tree), &bits, &noisy.bits, &tree);

        // Levenshtein would call 0110 -> 1001 three edits
        assert_eq!(noisy.flipped.len(), 4);
        assert_eq!(eval.channel_bit_errors, 4);
    }

    #[test]
    fn test_channel_bit_errors_match_flip_count() {
        let alphabet =
            Alphabet::from_counts([("a", 5), ("b", 9), ("c", 12), ("d", 13), ("e", 16), ("f", 45)])
                .unwrap();
        let tree = CodeTree::build(&alphabet).unwrap();
        let table = CodeTable::derive(&tree);
        let bits = encode_fixed(&"fadedcafebeef".repeat(20), &table).unwrap();

        for (level, seed) in [(1, 7), (13, 8), (50, 9), (99, 10)] {
            let noisy = corrupt(&bits, level, seed).unwrap();
            let decoded = decode(&noisy.bits, &tree);
            let eval = evaluate("", &decoded, &bits, &noisy.bits, &tree);
            assert_eq!(eval.channel_bit_errors, noisy.flipped.len());
        }
    }
}
