//! Error types for the simulation engine.

use thiserror::Error;

use crate::game::Status;

/// Errors raised by board construction, insertion and queries.
///
/// Out-of-bounds movement is not an error: the scheduler treats it as a
/// no-op move.
#[derive(Debug, Error)]
pub enum GameError {
    /// Board dimensions below the minimum.
    #[error("insufficient dimensions {width}x{height} (minimum {min_width}x{min_height})")]
    Dimension {
        /// Minimum accepted width.
        min_width: u16,
        /// Minimum accepted height.
        min_height: u16,
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
    },
    /// Coordinate outside the board.
    #[error("position ({row}, {col}) is outside the {width}x{height} board")]
    OutOfBounds {
        /// Board width.
        width: u16,
        /// Board height.
        height: u16,
        /// Offending row.
        row: u16,
        /// Offending column.
        col: u16,
    },
    /// Insert onto a slot that already holds a piece.
    #[error("position ({row}, {col}) is already occupied")]
    Occupied {
        /// Row of the slot.
        row: u16,
        /// Column of the slot.
        col: u16,
    },
    /// Query on a slot that holds no piece.
    #[error("position ({row}, {col}) is empty")]
    EmptySlot {
        /// Row of the slot.
        row: u16,
        /// Column of the slot.
        col: u16,
    },
    /// A round was requested while the game is not being played.
    #[error("cannot play a round while the game is {status:?}")]
    NotPlaying {
        /// Status at the time of the call.
        status: Status,
    },
    /// Writing a board render to the output sink failed.
    #[error("failed to write board: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for engine operations.
pub type GameResult<T> = Result<T, GameError>;
