//! CLI command implementations for Forage.

pub(crate) mod batch;
pub(crate) mod run;

mod output;

use clap::{Args, ValueEnum};
use forage::{ConfigError, GameConfig, GameError, StrategyKind};
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Output format for the `run` and `batch` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Strategy for populated strategic agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum StrategyArg {
    /// Prefer advantages, then food, then empty cells, then simple agents.
    Default,
    /// Attack other agents while energy is high.
    Aggressive,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Default => StrategyKind::Default,
            StrategyArg::Aggressive => StrategyKind::Aggressive,
        }
    }
}

/// Board options shared by every command. Flags override `--config`.
#[derive(Args, Debug, Clone)]
pub(crate) struct GameArgs {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board width (default: 10)
    #[arg(long)]
    width: Option<u16>,

    /// Board height (default: 10)
    #[arg(long)]
    height: Option<u16>,

    /// Random seed (default: random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Maximum rounds before the run stops (default: 1000)
    #[arg(short = 'r', long, conflicts_with = "uncapped")]
    max_rounds: Option<u32>,

    /// Play until the game is over, however long it takes
    #[arg(long)]
    uncapped: bool,

    /// Strategy for populated strategic agents
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,
}

impl GameArgs {
    /// Merge the config file (if any) with the command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the merged
    /// configuration is invalid.
    pub(crate) fn resolve(&self) -> Result<GameConfig, CliError> {
        let (mut config, file_seed) = match &self.config {
            Some(path) => {
                let config = GameConfig::from_json_file(path)?;
                (config, Some(config.seed))
            }
            None => (GameConfig::default(), None),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(max_rounds) = self.max_rounds {
            config.max_rounds = Some(max_rounds);
        }
        if self.uncapped {
            config.max_rounds = None;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy.into();
        }
        config.seed = self.seed.or(file_seed).unwrap_or_else(clock_seed);

        config.validate()?;
        Ok(config)
    }
}

/// Seed drawn from the system clock.
// Truncating the nanosecond count is fine for a seed.
#[allow(clippy::cast_possible_truncation)]
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<GameError> for CliError {
    fn from(e: GameError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}
