//! Integration tests for the full huffsim pipeline.
//!
//! These tests verify end-to-end behavior: corpus -> alphabet -> tree ->
//! encode -> (frame) -> noise -> decode -> evaluate, checking that clean runs
//! reproduce the input and noisy runs are scored consistently.

use huffsim_core::{
    codes::CodeTable,
    evaluate::{char_edit_distance, word_error_rate},
    framing::{parse_frame, serialize_frame},
    frequency::{char_frequencies, ngram_alphabet},
    harness::{run_outcomes, run_trials},
    noise::corrupt,
    Alphabet, Bitstream, Codec, EncodeMode, FrequencyConfig, TrialPlan,
};

fn textbook_alphabet() -> Alphabet {
    Alphabet::from_counts([("a", 5), ("b", 9), ("c", 12), ("d", 13), ("e", 16), ("f", 45)])
        .expect("valid alphabet")
}

/// Six-symbol textbook alphabet: exact round trip and tree accounting.
#[test]
fn test_textbook_round_trip() {
    let codec = Codec::new(&textbook_alphabet(), EncodeMode::Fixed).expect("build failed");

    let tx = codec.transmit("abccba", 0, 7).expect("transmit failed");

    assert_eq!(tx.decoded, "abccba");
    assert_eq!(tx.evaluation.edit_distance, 0);
    assert_eq!(tx.evaluation.word_error_rate, 0);
    assert_eq!(tx.evaluation.tree_size_bits, 11 * 168);
    assert_eq!(
        tx.evaluation.total_size_bits,
        tx.evaluation.encoded_size_bits + 1848
    );
    assert!(codec.table().is_prefix_free());
}

/// Level 100 inverts every bit; level 0 is a no-op.
#[test]
fn test_noise_extremes() {
    let bits: Bitstream = "0110".parse().expect("valid bits");

    let all = corrupt(&bits, 100, 3).expect("corrupt failed");
    assert_eq!(all.bits.to_string(), "1001");
    assert_eq!(all.flipped.len(), 4);

    let none = corrupt(&bits, 0, 3).expect("corrupt failed");
    assert_eq!(none.bits, bits);
    assert!(none.flipped.is_empty());
}

/// Character model built from the message itself always round-trips.
#[test]
fn test_char_model_pipeline() {
    let message = "The quick brown fox jumps over the lazy dog.";
    let alphabet = char_frequencies(message).expect("frequency model failed");
    let codec = Codec::new(&alphabet, EncodeMode::Fixed).expect("build failed");

    let bits = codec.encode(message).expect("encode failed");
    assert_eq!(codec.decode(&bits), message);

    // Fewer bits than 8 per character
    assert!(bits.len() < message.chars().count() * 8);
}

/// N-gram model with greedy encoding: round trip over folded text.
#[test]
fn test_ngram_pipeline() {
    let corpus = "the cat sat on the mat. the hat is on the cat.".repeat(4);
    let config = FrequencyConfig::default();
    let alphabet = ngram_alphabet(&corpus, &config).expect("n-gram model failed");
    assert!(alphabet.max_symbol_len() > 1);

    let codec = Codec::new(&alphabet, EncodeMode::Greedy).expect("build failed");
    let message = config.normalize("The cat is on the mat.");

    let greedy = codec.encode(&message).expect("greedy encode failed");
    assert_eq!(codec.decode(&greedy), message);

    // Every 1-gram is in the table, so fixed mode works on the same text
    let fixed = huffsim_core::encoder::encode_fixed(&message, codec.table())
        .expect("fixed encode failed");
    assert_eq!(codec.decode(&fixed), message);
}

/// Frame round trip: the parsed tree decodes exactly like the original.
#[test]
fn test_frame_then_noise() {
    let codec = Codec::new(&textbook_alphabet(), EncodeMode::Fixed).expect("build failed");
    let payload = codec.encode("fadedcafe").expect("encode failed");

    let bytes = serialize_frame(codec.tree(), &payload).expect("serialize failed");
    let frame = parse_frame(&bytes).expect("parse failed");

    assert_eq!(frame.payload, payload);
    assert_eq!(CodeTable::derive(&frame.tree), *codec.table());

    // Corrupt after the frame hop; both trees must agree on the damage
    let noisy = corrupt(&frame.payload, 25, 11).expect("corrupt failed");
    let restored = Codec::from_tree(frame.tree, EncodeMode::Fixed);
    assert_eq!(restored.decode(&noisy.bits), codec.decode(&noisy.bits));
}

/// A flipped byte anywhere in a frame is rejected.
#[test]
fn test_crc_corruption_detection() {
    let codec = Codec::new(&textbook_alphabet(), EncodeMode::Fixed).expect("build failed");
    let payload = codec.encode("bead").expect("encode failed");
    let mut bytes = serialize_frame(codec.tree(), &payload).expect("serialize failed");

    let len = bytes.len();
    bytes[len - 1] ^= 0xFF;

    assert!(parse_frame(&bytes).is_err());
}

/// Evaluation fields agree with the standalone distance functions.
#[test]
fn test_noisy_evaluation_consistency() {
    let message = "she sells sea shells by the sea shore";
    let alphabet = char_frequencies(message).expect("frequency model failed");
    let codec = Codec::new(&alphabet, EncodeMode::Fixed).expect("build failed");

    for seed in 0..20 {
        let tx = codec.transmit(message, 15, seed).expect("transmit failed");

        assert_eq!(
            tx.evaluation.edit_distance,
            char_edit_distance(message, &tx.decoded)
        );
        assert_eq!(
            tx.evaluation.word_error_rate,
            word_error_rate(message, &tx.decoded)
        );
        assert_eq!(
            tx.corruption.flipped.len(),
            tx.encoded.len() * 15 / 100
        );
        assert_eq!(tx.evaluation.channel_bit_errors, tx.corruption.flipped.len());
    }
}

/// Harness over a line batch: deterministic and order-preserving.
#[test]
fn test_trial_batch() {
    let lines = ["abccba", "fadedcafe", "beef", "decaf"];
    let codec = Codec::new(&textbook_alphabet(), EncodeMode::Fixed).expect("build failed");
    let trials = TrialPlan::repeat(&lines, 20, 10, 500);

    let first = run_trials(&codec, &trials).expect("trials failed");
    let second = run_trials(&codec, &trials).expect("trials failed");
    assert_eq!(first, second);
    assert_eq!(first.trials, 40);
    assert_eq!(first.mean_level(), 20.0);

    let outcomes = run_outcomes(&codec, &trials).expect("trials failed");
    assert_eq!(outcomes.len(), trials.len());
    for (trial, outcome) in trials.iter().zip(&outcomes) {
        assert_eq!(outcome.input_chars, trial.input.chars().count());
        assert_eq!(outcome.level, trial.level);
    }
}
