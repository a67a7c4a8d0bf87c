//! Forage CLI - Command-line interface for running Forage simulations.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Forage - A deterministic grid simulation of foraging agents
#[derive(Parser, Debug)]
#[command(name = "forage")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a single game and print the board
    Run {
        #[command(flatten)]
        game: cli::GameArgs,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Print the board after every round
        #[arg(short, long, conflicts_with = "quiet")]
        verbose: bool,

        /// Only print the final summary
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run many seeded games in parallel and aggregate statistics
    Batch {
        #[command(flatten)]
        game: cli::GameArgs,

        /// Number of games to run (default: 100)
        #[arg(short, long, default_value = "100")]
        games: u64,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

/// Log to stderr, filtered by `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    let result = match args.command {
        Commands::Run {
            game,
            format,
            verbose,
            quiet,
        } => cli::run::execute(&game, format, verbose, quiet),

        Commands::Batch {
            game,
            games,
            threads,
            format,
            progress,
        } => cli::batch::execute(&game, games, threads, format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
