//! Game configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::rules::{MIN_HEIGHT, MIN_WIDTH};

/// Strategy handed to strategic agents created by board population.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// [`crate::game::DefaultAgentStrategy`].
    #[default]
    Default,
    /// [`crate::game::AggressiveAgentStrategy`].
    Aggressive,
}

/// Configuration for a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in columns.
    pub width: u16,
    /// Board height in rows.
    pub height: u16,
    /// Seed for the engine's random generator.
    pub seed: u64,
    /// Stop the run loop after this many rounds even if resources remain.
    pub max_rounds: Option<u32>,
    /// Fill the board with agents and resources on construction.
    pub populate: bool,
    /// Strategy for populated strategic agents.
    pub strategy: StrategyKind,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            seed: 0,
            max_rounds: Some(1000),
            populate: true,
            strategy: StrategyKind::Default,
        }
    }
}

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid configuration JSON.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The values are out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl GameConfig {
    /// Configuration for an empty board to be filled by hand.
    #[must_use]
    pub fn manual(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            populate: false,
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails
    /// [`GameConfig::validate`].
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for sub-minimum dimensions or a zero
    /// round cap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(ConfigError::Invalid(format!(
                "board {}x{} is smaller than {MIN_WIDTH}x{MIN_HEIGHT}",
                self.width, self.height
            )));
        }
        if self.max_rounds == Some(0) {
            return Err(ConfigError::Invalid("max_rounds must be positive".to_string()));
        }
        Ok(())
    }
}
