//! Subcommand bodies.

use crate::cli::ModelKind;
use crate::config::{Config, Job};
use crate::input_gen::{generate_sample_lines, generate_sample_text};
use huffsim_core::{
    framing::serialize_frame,
    frequency::{char_frequencies, ngram_alphabet},
    harness::run_trials,
    Codec, Error, Evaluation, Result, TrialPlan,
};
use std::borrow::Cow;
use std::fs;
use std::time::Instant;
use tracing::{debug, info};

/// Words in a generated `run` message.
const SAMPLE_WORDS: usize = 24;

/// Lines generated for `trials` without a lines file.
const SAMPLE_LINES: usize = 8;

pub fn run(config: &Config) -> Result<()> {
    match &config.job {
        Job::Single { .. } => single(config),
        Job::Trials { .. } => trials(config),
    }
}

/// Build the frequency model from `source` and the codec over it.
fn build_codec(config: &Config, source: &str) -> Result<Codec> {
    let alphabet = match config.model {
        ModelKind::Char => char_frequencies(source)?,
        ModelKind::Ngram => ngram_alphabet(source, &config.frequency)?,
    };
    info!(
        symbols = alphabet.len(),
        longest = alphabet.max_symbol_len(),
        "Built frequency model"
    );

    let codec = Codec::new(&alphabet, config.encode_mode())?;
    debug!(
        nodes = codec.tree().node_count(),
        depth = codec.tree().depth(),
        "Built code tree"
    );
    Ok(codec)
}

/// Apply the model's text normalization.
fn prepare<'a>(config: &Config, text: &'a str) -> Cow<'a, str> {
    match config.model {
        ModelKind::Char => Cow::Borrowed(text),
        ModelKind::Ngram => config.frequency.normalize(text),
    }
}

fn load_corpus(config: &Config) -> Result<Option<String>> {
    config
        .corpus
        .as_ref()
        .map(|path| {
            info!(path = %path.display(), "Reading corpus");
            fs::read_to_string(path)
        })
        .transpose()
        .map_err(Error::from)
}

fn single(config: &Config) -> Result<()> {
    let Job::Single {
        message,
        level,
        frame_out,
    } = &config.job
    else {
        return Err(Error::Config("expected a single-run job".to_string()));
    };

    let message = match message {
        Some(message) => message.clone(),
        None => generate_sample_text(config.seed, SAMPLE_WORDS),
    };
    let corpus = load_corpus(config)?;

    let codec = build_codec(config, corpus.as_deref().unwrap_or(&message))?;
    let message = prepare(config, &message);
    let tx = codec.transmit(&message, *level, config.seed)?;

    println!("=== Transmission ===");
    println!("Message: {}", message);
    println!("Encoded ({} bits): {}", tx.encoded.len(), tx.encoded);
    println!("Corrupted: {}", tx.corruption.bits);
    println!("Flipped indexes: {:?}", tx.corruption.flipped);
    println!("Decoded: {}", tx.decoded);
    println!();

    println!("=== Codes ===");
    for (symbol, code) in codec.table().iter() {
        println!("{:?}: {}", symbol, code);
    }
    println!();

    print_evaluation(&tx.evaluation);

    if let Some(path) = frame_out {
        let frame = serialize_frame(codec.tree(), &tx.encoded)?;
        fs::write(path, &frame)?;
        info!(path = %path.display(), bytes = frame.len(), "Wrote frame");
        println!("Frame written: {} ({} bytes)", path.display(), frame.len());
    }

    Ok(())
}

fn trials(config: &Config) -> Result<()> {
    let Job::Trials {
        lines_file,
        level,
        repetitions,
    } = &config.job
    else {
        return Err(Error::Config("expected a trials job".to_string()));
    };

    let lines: Vec<String> = match lines_file {
        Some(path) => {
            info!(path = %path.display(), "Reading lines");
            fs::read_to_string(path)?
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        }
        None => generate_sample_lines(config.seed, SAMPLE_LINES),
    };
    if lines.is_empty() {
        return Err(Error::Config("no input lines to run trials on".to_string()));
    }

    let corpus = load_corpus(config)?;
    let source = match corpus {
        Some(corpus) => corpus,
        None => lines.join(" "),
    };
    let codec = build_codec(config, &source)?;

    let lines: Vec<Cow<'_, str>> = lines.iter().map(|line| prepare(config, line)).collect();
    let plan = TrialPlan {
        level: level.unwrap_or_default(),
        repetitions: *repetitions,
        base_seed: config.seed,
        random_levels: level.is_none(),
    };
    let trials = plan.expand(&lines);

    let start = Instant::now();
    let summary = run_trials(&codec, &trials)?;
    let elapsed = start.elapsed();

    summary.print_summary();
    println!(
        "Ran {} trials in {:.3} s",
        summary.trials,
        elapsed.as_secs_f64()
    );

    Ok(())
}

fn print_evaluation(eval: &Evaluation) {
    println!("=== Evaluation ===");
    println!("Original size: {} bits", eval.original_size_bits);
    println!("Encoded size: {} bits", eval.encoded_size_bits);
    println!("Tree size: {} bits", eval.tree_size_bits);
    println!("Total size: {} bits", eval.total_size_bits);
    println!("Compression ratio: {:.4}", eval.compression_ratio);
    println!("Raw compression ratio: {:.4}", eval.raw_compression_ratio);
    println!("Space saving: {:.2}%", eval.space_saving_percent);
    println!("Channel bit errors: {}", eval.channel_bit_errors);
    println!("Edit distance: {}", eval.edit_distance);
    println!("Word errors: {}", eval.word_error_rate);
    println!();
}
