mod cli;
mod commands;
mod config;
mod input_gen;

use clap::Parser;
use cli::Cli;
use config::Config;

fn init_tracing(cli: &Cli) {
    // --quiet: off; --verbose: RUST_LOG, else info; default: warnings only.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    let config = Config::from_command(cli.command);
    if config.print_config {
        config.print();
    }

    if let Err(e) = commands::run(&config) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
