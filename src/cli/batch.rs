//! Batch command implementation.

use super::output::{BatchStats, JsonBatchResult, format_batch_text};
use super::{CliError, GameArgs, OutputFormat};
use forage::{Game, GameConfig};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;

/// Execute the batch command.
///
/// Game `i` is seeded with `base_seed + i`, so a batch is reproducible
/// from its base seed regardless of thread count.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the thread pool
/// cannot be built.
pub(crate) fn execute(
    args: &GameArgs,
    games: u64,
    threads: Option<usize>,
    format: OutputFormat,
    progress: bool,
) -> Result<(), CliError> {
    let base = args.resolve()?;

    // Zero means rayon's default (one thread per CPU).
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.unwrap_or(0))
        .build()
        .map_err(|e| CliError::new(format!("Failed to build thread pool: {e}")))?;

    let pb = if progress {
        let pb = ProgressBar::new(games);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
                .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each worker accumulates into its own BatchStats, merged at the end.
    let stats = pool.install(|| {
        (0..games)
            .into_par_iter()
            .fold(BatchStats::default, |mut local, i| {
                let config = GameConfig {
                    seed: base.seed.wrapping_add(i),
                    ..base
                };
                match Game::new(config).and_then(|mut game| game.run()) {
                    Ok(outcome) => local.add_outcome(&outcome),
                    Err(_) => local.add_failure(),
                }
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
                local
            })
            .reduce(BatchStats::default, |mut a, b| {
                a.merge(&b);
                a
            })
    });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    #[allow(clippy::cast_precision_loss)]
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        OutputFormat::Text => {
            println!();
            print!("{}", format_batch_text(&stats));
            println!();
            println!("Duration: {:.2}s ({games_per_sec:.0} games/sec)", duration.as_secs_f64());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonBatchResult::from_stats(&stats, base.seed))?;
            println!("{json}");
        }
    }

    Ok(())
}
