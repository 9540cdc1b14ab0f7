use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "huffsim",
    about = "Huffman coding over a noisy channel",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable log output (honours RUST_LOG, otherwise info)
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all log output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode one message, corrupt it, decode it and report
    Run(RunArgs),

    /// Run batches of noisy trials and report averages
    Trials(TrialsArgs),
}

/// Frequency model selection.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelKind {
    /// One symbol per character, fixed encoding
    Char,
    /// Characters plus frequent 2- and 3-grams, greedy encoding
    Ngram,
}

/// Options shared by every subcommand.
#[derive(Args, Debug)]
pub struct CodeArgs {
    /// Text file to build the frequency model from (default: the input itself)
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Frequency model
    #[arg(long, value_enum, default_value_t = ModelKind::Char)]
    pub mode: ModelKind,

    /// Minimum share (percent) for 2- and 3-grams in ngram mode
    #[arg(long, default_value_t = 1.0)]
    pub threshold: f64,

    /// Random seed (default: time-based, printed with --print-config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the resolved configuration before running
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Message to transmit (default: generated sample text)
    pub message: Option<String>,

    /// Percentage of payload bits to flip
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub level: u8,

    /// Write the tree + clean payload frame to this path
    #[arg(long)]
    pub frame_out: Option<PathBuf>,

    #[command(flatten)]
    pub code: CodeArgs,
}

#[derive(Args, Debug)]
pub struct TrialsArgs {
    /// File with one message per line (default: generated sample lines)
    pub lines: Option<PathBuf>,

    /// Percentage of payload bits to flip (default: random per trial)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub level: Option<u8>,

    /// Trials per line
    #[arg(long, default_value_t = 100)]
    pub repetitions: usize,

    #[command(flatten)]
    pub code: CodeArgs,
}
