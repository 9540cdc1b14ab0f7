//! Aggregate metrics over many noisy-channel trials.
//!
//! A [`TrialSummary`] accumulates per-trial [`Evaluation`]s as running sums
//! and reports means. Summaries are plain data: they can be built trial by
//! trial with [`TrialSummary::record`] or combined with
//! [`TrialSummary::merge`].
//!
//! # Thread Safety
//!
//! `TrialSummary` is not synchronized. The harness collects outcomes from
//! its workers first and folds them on one thread, in trial order, so the
//! floating-point sums do not depend on scheduling.

use crate::evaluate::Evaluation;

/// Result of one trial, as recorded by the harness.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialOutcome {
    /// Corruption level used, in percent
    pub level: u8,

    /// Input length in characters
    pub input_chars: usize,

    /// Decoder output
    pub decoded: String,

    pub evaluation: Evaluation,
}

impl TrialOutcome {
    /// Edit distance divided by input length (0.0 for empty inputs).
    pub fn normalized_distance(&self) -> f64 {
        if self.input_chars == 0 {
            0.0
        } else {
            self.evaluation.edit_distance as f64 / self.input_chars as f64
        }
    }
}

/// Running totals over a batch of trials.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialSummary {
    // === Counts ===
    /// Trials recorded
    pub trials: u64,

    /// Trials whose decode matched the input exactly
    pub exact_decodes: u64,

    /// Total input characters over all trials
    pub input_chars: u64,

    // === Sizes ===
    /// Total clean payload bits
    pub encoded_bits: u64,

    /// Total bits flipped by the noise model
    pub channel_bit_errors: u64,

    // === Sums for means ===
    pub level_sum: u64,
    pub compression_ratio_sum: f64,
    pub raw_compression_ratio_sum: f64,
    pub edit_distance_sum: u64,
    pub normalized_distance_sum: f64,
    pub word_error_sum: u64,
}

impl TrialSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `outcomes` in order.
    pub fn from_outcomes<'a, I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = &'a TrialOutcome>,
    {
        let mut summary = Self::new();
        for outcome in outcomes {
            summary.record(outcome);
        }
        summary
    }

    /// Add one trial.
    pub fn record(&mut self, outcome: &TrialOutcome) {
        let eval = &outcome.evaluation;

        self.trials += 1;
        if eval.edit_distance == 0 {
            self.exact_decodes += 1;
        }
        self.input_chars += outcome.input_chars as u64;
        self.encoded_bits += eval.encoded_size_bits as u64;
        self.channel_bit_errors += eval.channel_bit_errors as u64;

        self.level_sum += outcome.level as u64;
        self.compression_ratio_sum += eval.compression_ratio;
        self.raw_compression_ratio_sum += eval.raw_compression_ratio;
        self.edit_distance_sum += eval.edit_distance as u64;
        self.normalized_distance_sum += outcome.normalized_distance();
        self.word_error_sum += eval.word_error_rate as u64;
    }

    /// Combine two summaries.
    pub fn merge(mut self, other: &TrialSummary) -> Self {
        self.trials += other.trials;
        self.exact_decodes += other.exact_decodes;
        self.input_chars += other.input_chars;
        self.encoded_bits += other.encoded_bits;
        self.channel_bit_errors += other.channel_bit_errors;
        self.level_sum += other.level_sum;
        self.compression_ratio_sum += other.compression_ratio_sum;
        self.raw_compression_ratio_sum += other.raw_compression_ratio_sum;
        self.edit_distance_sum += other.edit_distance_sum;
        self.normalized_distance_sum += other.normalized_distance_sum;
        self.word_error_sum += other.word_error_sum;
        self
    }

    fn mean(&self, sum: f64) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            sum / self.trials as f64
        }
    }

    pub fn mean_level(&self) -> f64 {
        self.mean(self.level_sum as f64)
    }

    pub fn mean_compression_ratio(&self) -> f64 {
        self.mean(self.compression_ratio_sum)
    }

    pub fn mean_raw_compression_ratio(&self) -> f64 {
        self.mean(self.raw_compression_ratio_sum)
    }

    pub fn mean_edit_distance(&self) -> f64 {
        self.mean(self.edit_distance_sum as f64)
    }

    /// Mean of per-trial (distance / input length).
    pub fn mean_normalized_distance(&self) -> f64 {
        self.mean(self.normalized_distance_sum)
    }

    pub fn mean_word_error_rate(&self) -> f64 {
        self.mean(self.word_error_sum as f64)
    }

    /// Share of input characters that survived, in percent.
    ///
    /// Computed from total distance over total input length; can go below
    /// zero when corrupted decodes are much longer than their inputs.
    pub fn correct_char_percent(&self) -> f64 {
        if self.input_chars == 0 {
            0.0
        } else {
            (1.0 - self.edit_distance_sum as f64 / self.input_chars as f64) * 100.0
        }
    }

    /// Fraction of trials decoded without any error.
    pub fn exact_decode_rate(&self) -> f64 {
        self.mean(self.exact_decodes as f64)
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Trial Summary ===");
        println!("Trials: {}", self.trials);
        println!("Mean error level: {:.2}%", self.mean_level());
        println!();

        println!("=== Compression ===");
        println!("Payload bits: {}", self.encoded_bits);
        println!("Mean ratio (normalized): {:.4}", self.mean_compression_ratio());
        println!("Mean ratio (raw): {:.4}", self.mean_raw_compression_ratio());
        println!();

        println!("=== Resilience ===");
        println!("Bit errors injected: {}", self.channel_bit_errors);
        println!("Mean edit distance: {:.3}", self.mean_edit_distance());
        println!("Mean distance / length: {:.4}", self.mean_normalized_distance());
        println!("Mean word errors: {:.3}", self.mean_word_error_rate());
        println!("Correct chars: {:.2}%", self.correct_char_percent());
        println!(
            "Exact decodes: {} ({:.2}%)",
            self.exact_decodes,
            self.exact_decode_rate() * 100.0
        );
        println!();
    }

    /// Export as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "trials={}\n\
             mean_level={:.4}\n\
             encoded_bits={}\n\
             mean_compression_ratio={:.4}\n\
             mean_raw_compression_ratio={:.4}\n\
             channel_bit_errors={}\n\
             mean_edit_distance={:.4}\n\
             mean_normalized_distance={:.4}\n\
             mean_word_error_rate={:.4}\n\
             correct_char_percent={:.4}\n\
             exact_decodes={}\n",
            self.trials,
            self.mean_level(),
            self.encoded_bits,
            self.mean_compression_ratio(),
            self.mean_raw_compression_ratio(),
            self.channel_bit_errors,
            self.mean_edit_distance(),
            self.mean_normalized_distance(),
            self.mean_word_error_rate(),
            self.correct_char_percent(),
            self.exact_decodes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(level: u8, input_chars: usize, edit_distance: usize, ratio: f64) -> TrialOutcome {
        TrialOutcome {
            level,
            input_chars,
            decoded: String::new(),
            evaluation: Evaluation {
                original_size_bits: input_chars * 8,
                encoded_size_bits: 10,
                tree_size_bits: 168,
                total_size_bits: 178,
                compression_ratio: ratio,
                raw_compression_ratio: ratio,
                space_saving_percent: 0.0,
                edit_distance,
                word_error_rate: edit_distance.min(1),
                channel_bit_errors: level as usize / 10,
            },
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = TrialSummary::new();
        assert_eq!(summary.mean_edit_distance(), 0.0);
        assert_eq!(summary.correct_char_percent(), 0.0);
        assert_eq!(summary.exact_decode_rate(), 0.0);
    }

    #[test]
    fn test_means() {
        let outcomes = [outcome(0, 10, 0, 0.5), outcome(20, 10, 4, 0.25)];
        let summary = TrialSummary::from_outcomes(&outcomes);

        assert_eq!(summary.trials, 2);
        assert_eq!(summary.exact_decodes, 1);
        assert_eq!(summary.mean_level(), 10.0);
        assert_eq!(summary.mean_compression_ratio(), 0.375);
        assert_eq!(summary.mean_edit_distance(), 2.0);
        assert_eq!(summary.mean_normalized_distance(), 0.2);
        assert_eq!(summary.mean_word_error_rate(), 0.5);
        assert!((summary.correct_char_percent() - 80.0).abs() < 1e-9);
        assert_eq!(summary.channel_bit_errors, 2);
    }

    #[test]
    fn test_normalized_distance_empty_input() {
        assert_eq!(outcome(5, 0, 3, 0.0).normalized_distance(), 0.0);
    }

    #[test]
    fn test_merge_matches_record() {
        let outcomes = [outcome(1, 4, 1, 0.5), outcome(2, 6, 0, 0.5), outcome(3, 8, 2, 0.5)];

        let whole = TrialSummary::from_outcomes(&outcomes);
        let left = TrialSummary::from_outcomes(&outcomes[..1]);
        let right = TrialSummary::from_outcomes(&outcomes[1..]);

        assert_eq!(left.merge(&right), whole);
    }

    #[test]
    fn test_export_text() {
        let summary = TrialSummary::from_outcomes(&[outcome(10, 5, 0, 0.5)]);
        let text = summary.export_text();

        assert!(text.contains("trials=1\n"));
        assert!(text.contains("mean_level=10.0000\n"));
        assert!(text.contains("exact_decodes=1\n"));
    }
}
