//! Sample text generation.
//!
//! When no message or lines file is given, we generate lowercase English-like
//! text from a fixed word list. Word frequencies are skewed (earlier words
//! are picked more often) so the character distribution is uneven enough
//! for Huffman codes to beat 8 bits per character.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const WORDS: &[&str] = &[
    "the", "of", "and", "to", "in", "is", "that", "it", "was", "for", "on", "are", "with",
    "as", "be", "at", "one", "have", "this", "from", "by", "hot", "word", "but", "what",
    "some", "we", "can", "out", "other", "were", "all", "there", "when", "up", "use", "your",
    "how", "said", "each", "she", "which", "do", "their", "time", "if", "will", "way",
    "about", "many", "then", "them", "write", "would", "like", "so", "these", "her", "long",
    "make", "thing", "see", "him", "two", "has", "look", "more", "day", "could", "go",
    "come", "did", "number", "sound", "no", "most", "people", "my", "over", "know", "water",
    "than", "call", "first", "who", "may", "down", "side", "been", "now", "find", "channel",
    "noise", "signal", "code", "tree", "bit",
];

/// Generate one line of `word_count` words.
pub fn generate_sentence(rng: &mut ChaCha8Rng, word_count: usize) -> String {
    let mut words = Vec::with_capacity(word_count);
    for _ in 0..word_count {
        // Minimum of two draws skews toward the front of the list
        let a = rng.gen_range(0..WORDS.len());
        let b = rng.gen_range(0..WORDS.len());
        words.push(WORDS[a.min(b)]);
    }
    words.join(" ")
}

/// Generate a sample message of `word_count` words.
pub fn generate_sample_text(seed: u64, word_count: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_sentence(&mut rng, word_count)
}

/// Generate `line_count` lines of 4 to 16 words each.
pub fn generate_sample_lines(seed: u64, line_count: usize) -> Vec<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..line_count)
        .map(|_| {
            let word_count = rng.gen_range(4..=16);
            generate_sentence(&mut rng, word_count)
        })
        .collect()
}
