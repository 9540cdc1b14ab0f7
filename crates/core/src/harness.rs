//! Trial harness: many (input, level, seed) transmissions over one codec.
//!
//! Trials are independent. [`run_trials`] maps them over the rayon pool,
//! collects the outcomes in trial order and folds them on the calling
//! thread, so a parallel run reports exactly what a sequential one would.

use crate::codec::Codec;
use crate::error::Result;
use crate::metrics::{TrialOutcome, TrialSummary};
use crate::noise::MAX_LEVEL;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

/// One transmission to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trial {
    pub input: String,
    /// Corruption level in percent
    pub level: u8,
    pub seed: u64,
}

impl Trial {
    pub fn new(input: impl Into<String>, level: u8, seed: u64) -> Self {
        Self {
            input: input.into(),
            level,
            seed,
        }
    }
}

/// How to expand input lines into trials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialPlan {
    /// Corruption level for every trial (ignored when `random_levels` is set)
    pub level: u8,

    /// Trials per input line
    pub repetitions: usize,

    /// Seed of trial `i` is `base_seed + i`
    pub base_seed: u64,

    /// Draw each trial's level uniformly from 0..=100
    pub random_levels: bool,
}

impl Default for TrialPlan {
    fn default() -> Self {
        Self {
            level: 10,
            repetitions: 1,
            base_seed: 0,
            random_levels: false,
        }
    }
}

impl TrialPlan {
    /// Fixed-level trials: every line `repetitions` times.
    pub fn repeat<S: AsRef<str>>(
        lines: &[S],
        level: u8,
        repetitions: usize,
        base_seed: u64,
    ) -> Vec<Trial> {
        TrialPlan {
            level,
            repetitions,
            base_seed,
            random_levels: false,
        }
        .expand(lines)
    }

    /// Expand `lines` into trials, line-major.
    ///
    /// Random levels come from a ChaCha8 RNG seeded with `base_seed`, drawn
    /// in trial order.
    pub fn expand<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Trial> {
        let mut level_rng = ChaCha8Rng::seed_from_u64(self.base_seed);
        let mut trials = Vec::with_capacity(lines.len() * self.repetitions);

        for line in lines {
            for _ in 0..self.repetitions {
                let level = if self.random_levels {
                    level_rng.gen_range(0..=MAX_LEVEL)
                } else {
                    self.level
                };
                let seed = self.base_seed.wrapping_add(trials.len() as u64);
                trials.push(Trial::new(line.as_ref(), level, seed));
            }
        }

        trials
    }
}

/// Run a single trial.
pub fn run_trial(codec: &Codec, trial: &Trial) -> Result<TrialOutcome> {
    let tx = codec.transmit(&trial.input, trial.level, trial.seed)?;

    Ok(TrialOutcome {
        level: trial.level,
        input_chars: trial.input.chars().count(),
        decoded: tx.decoded,
        evaluation: tx.evaluation,
    })
}

/// Run every trial in parallel and return the outcomes in trial order.
///
/// # Errors
/// The error of a failing trial (e.g., an input with an uncoded symbol).
pub fn run_outcomes(codec: &Codec, trials: &[Trial]) -> Result<Vec<TrialOutcome>> {
    trials
        .par_iter()
        .map(|trial| run_trial(codec, trial))
        .collect()
}

/// Run every trial in parallel and summarize.
pub fn run_trials(codec: &Codec, trials: &[Trial]) -> Result<TrialSummary> {
    info!(
        trials = trials.len(),
        threads = rayon::current_num_threads(),
        "Running trials"
    );
    let start = Instant::now();

    let outcomes = run_outcomes(codec, trials)?;
    let summary = TrialSummary::from_outcomes(&outcomes);

    debug!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        exact_decodes = summary.exact_decodes,
        "Trials complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::encoder::EncodeMode;
    use crate::error::{EncodeError, Error};

    fn codec() -> Codec {
        let alphabet =
            Alphabet::from_counts([("a", 5), ("b", 9), ("c", 12), ("d", 13), ("e", 16), ("f", 45)])
                .unwrap();
        Codec::new(&alphabet, EncodeMode::Fixed).unwrap()
    }

    #[test]
    fn test_repeat_layout() {
        let trials = TrialPlan::repeat(&["ab", "cd"], 20, 3, 100);

        assert_eq!(trials.len(), 6);
        assert_eq!(trials[0], Trial::new("ab", 20, 100));
        assert_eq!(trials[2], Trial::new("ab", 20, 102));
        assert_eq!(trials[3], Trial::new("cd", 20, 103));
        assert!(trials.iter().all(|t| t.level == 20));
    }

    #[test]
    fn test_random_levels_are_seeded() {
        let plan = TrialPlan {
            repetitions: 50,
            base_seed: 9,
            random_levels: true,
            ..TrialPlan::default()
        };
        let first = plan.expand(&["face"]);
        let second = plan.expand(&["face"]);

        assert_eq!(first, second);
        assert!(first.iter().all(|t| t.level <= MAX_LEVEL));
        assert!(first.iter().any(|t| t.level != first[0].level));
    }

    #[test]
    fn test_clean_trials_are_exact() {
        let trials = TrialPlan::repeat(&["abccba", "fade"], 0, 4, 1);
        let summary = run_trials(&codec(), &trials).unwrap();

        assert_eq!(summary.trials, 8);
        assert_eq!(summary.exact_decodes, 8);
        assert_eq!(summary.mean_edit_distance(), 0.0);
        assert_eq!(summary.channel_bit_errors, 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let codec = codec();
        let plan = TrialPlan {
            repetitions: 25,
            base_seed: 42,
            random_levels: true,
            ..TrialPlan::default()
        };
        let trials = plan.expand(&["abccba", "deadbeef", "cafefade"]);

        let parallel = run_trials(&codec, &trials).unwrap();

        let mut sequential = TrialSummary::new();
        for trial in &trials {
            sequential.record(&run_trial(&codec, trial).unwrap());
        }

        assert_eq!(parallel, sequential);
        assert_eq!(parallel.trials, 75);
    }

    #[test]
    fn test_trial_error_propagates() {
        let trials = vec![Trial::new("abc", 0, 0), Trial::new("xyz", 0, 0)];
        assert!(matches!(
            run_trials(&codec(), &trials),
            Err(Error::Encode(EncodeError::MissingCode { .. }))
        ));
    }

    #[test]
    fn test_empty_batch() {
        let summary = run_trials(&codec(), &[]).unwrap();
        assert_eq!(summary, TrialSummary::default());
    }
}
