// Allow unwrap and float comparisons in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::float_cmp))]
//! Forage: a deterministic grid simulation of agents competing for resources.
//!
//! Agents wander a bounded board, fight each other and consume resources.
//! Everything decays each turn, so every game ends once the resources are
//! gone. Given the same seed a game always plays out identically.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     CLI (run / batch)               │
//! ├─────────────────────────────────────┤
//! │     Game: rounds, status, rng       │
//! ├─────────────────────────────────────┤
//! │     Grid of Pieces + Strategies     │
//! └─────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod game;

pub use config::{ConfigError, GameConfig, StrategyKind};
pub use error::{GameError, GameResult};

// Re-export key game types at crate root for convenience
pub use game::{
    ActionType, Game, Piece, PieceId, PieceType, PlayOutcome, Position, RoundReport, Status,
    Strategy, Surroundings,
};
