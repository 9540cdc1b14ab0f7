//! Resolved configuration for a huffsim run.
//!
//! Turns parsed arguments into a fully explicit [`Config`]: every default is
//! filled in, including a time-based seed when none was given, so a printed
//! config is enough to reproduce the run.

use crate::cli::{CodeArgs, Commands, ModelKind, RunArgs, TrialsArgs};
use huffsim_core::{EncodeMode, FrequencyConfig};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// What to do once the codec is built.
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    /// One message, one corruption
    Single {
        /// None = generate sample text
        message: Option<String>,
        level: u8,
        frame_out: Option<PathBuf>,
    },

    /// Batched trials over lines
    Trials {
        /// None = generate sample lines
        lines_file: Option<PathBuf>,
        /// None = random level per trial
        level: Option<u8>,
        repetitions: usize,
    },
}

/// Complete configuration for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // === Model ===
    /// Corpus file (None = build the model from the input itself)
    pub corpus: Option<PathBuf>,

    pub model: ModelKind,

    /// N-gram model settings (used in ngram mode)
    pub frequency: FrequencyConfig,

    // === Randomness ===
    pub seed: u64,

    /// Whether `seed` was picked from the clock
    pub seed_generated: bool,

    // === Behavior ===
    pub job: Job,

    /// Whether to print the resolved config
    pub print_config: bool,
}

impl Config {
    /// Resolve a parsed subcommand.
    pub fn from_command(command: Commands) -> Self {
        match command {
            Commands::Run(RunArgs {
                message,
                level,
                frame_out,
                code,
            }) => Self::resolve(
                code,
                Job::Single {
                    message,
                    level,
                    frame_out,
                },
            ),
            Commands::Trials(TrialsArgs {
                lines,
                level,
                repetitions,
                code,
            }) => Self::resolve(
                code,
                Job::Trials {
                    lines_file: lines,
                    level,
                    repetitions,
                },
            ),
        }
    }

    fn resolve(code: CodeArgs, job: Job) -> Self {
        let (seed, seed_generated) = match code.seed {
            Some(seed) => (seed, false),
            None => (time_seed(), true),
        };

        Config {
            corpus: code.corpus,
            model: code.mode,
            frequency: FrequencyConfig {
                threshold_percent: code.threshold,
                ..FrequencyConfig::default()
            },
            seed,
            seed_generated,
            job,
            print_config: code.print_config,
        }
    }

    /// Encode mode implied by the model.
    pub fn encode_mode(&self) -> EncodeMode {
        match self.model {
            ModelKind::Char => EncodeMode::Fixed,
            ModelKind::Ngram => EncodeMode::Greedy,
        }
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.corpus {
            Some(path) => println!("Corpus: {}", path.display()),
            None => println!("Corpus: (input text)"),
        }
        match self.model {
            ModelKind::Char => println!("Model: characters (fixed encoding)"),
            ModelKind::Ngram => {
                println!("Model: n-grams up to {} (greedy encoding)", self.frequency.max_ngram);
                println!("N-gram threshold: {:.2}%", self.frequency.threshold_percent);
                println!("Case folding: {}", self.frequency.fold_case);
            }
        }
        println!(
            "Seed: {}{}",
            self.seed,
            if self.seed_generated { " (time-based)" } else { "" }
        );
        println!();

        match &self.job {
            Job::Single {
                message,
                level,
                frame_out,
            } => {
                println!("=== Single Run ===");
                println!(
                    "Message: {}",
                    message.as_deref().unwrap_or("(generate sample)")
                );
                println!("Error level: {}%", level);
                if let Some(path) = frame_out {
                    println!("Frame output: {}", path.display());
                }
            }
            Job::Trials {
                lines_file,
                level,
                repetitions,
            } => {
                println!("=== Trials ===");
                match lines_file {
                    Some(path) => println!("Lines: {}", path.display()),
                    None => println!("Lines: (generate sample)"),
                }
                match level {
                    Some(level) => println!("Error level: {}%", level),
                    None => println!("Error level: random 0-100%"),
                }
                println!("Repetitions per line: {}", repetitions);
            }
        }
        println!();
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
