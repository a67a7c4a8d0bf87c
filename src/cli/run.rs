//! Run command implementation.

use super::output::{JsonRunSummary, format_text};
use super::{CliError, GameArgs, OutputFormat};
use forage::Game;
use std::io::{self, Write};

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or output fails.
pub(crate) fn execute(
    args: &GameArgs,
    format: OutputFormat,
    verbose: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let config = args.resolve()?;
    let mut game = Game::new(config)?;

    match format {
        OutputFormat::Text => {
            let stdout = io::stdout();
            let mut out = stdout.lock();

            let outcome = if quiet {
                game.run()?
            } else {
                writeln!(
                    out,
                    "Running {}x{} game with seed {}...",
                    config.width, config.height, config.seed
                )?;
                writeln!(out)?;
                game.play(&mut out, verbose)?
            };

            writeln!(out)?;
            write!(out, "{}", format_text(&game, &outcome))?;
        }
        OutputFormat::Json => {
            let outcome = game.run()?;
            let json = serde_json::to_string_pretty(&JsonRunSummary::from_game(&game, &outcome))?;
            println!("{json}");
        }
    }

    Ok(())
}
