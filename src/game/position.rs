//! Grid coordinates and the nine movement actions.

use serde::{Deserialize, Serialize};

/// A coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Row (0 is the top row).
    pub row: u16,
    /// Column (0 is the left column).
    pub col: u16,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// Translate by `action`, returning `None` if the result leaves a
    /// `width` x `height` board.
    #[must_use]
    pub fn step(self, action: ActionType, width: u16, height: u16) -> Option<Self> {
        let (d_row, d_col) = action.delta();
        let row = i32::from(self.row) + i32::from(d_row);
        let col = i32::from(self.col) + i32::from(d_col);
        if row < 0 || col < 0 || row >= i32::from(height) || col >= i32::from(width) {
            return None;
        }
        // Bounded by width/height above, so both fit in u16.
        let row = u16::try_from(row).ok()?;
        let col = u16::try_from(col).ok()?;
        Some(Self::new(row, col))
    }
}

/// One of the eight compass moves, or staying put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    /// Up one row.
    North,
    /// Up one row, right one column.
    NorthEast,
    /// Right one column.
    East,
    /// Down one row, right one column.
    SouthEast,
    /// Down one row.
    South,
    /// Down one row, left one column.
    SouthWest,
    /// Left one column.
    West,
    /// Up one row, left one column.
    NorthWest,
    /// No movement.
    Stay,
}

impl ActionType {
    /// All actions in surroundings-index order (NW, N, NE, W, STAY, E, SW, S, SE).
    pub const BY_INDEX: [ActionType; 9] = [
        ActionType::NorthWest,
        ActionType::North,
        ActionType::NorthEast,
        ActionType::West,
        ActionType::Stay,
        ActionType::East,
        ActionType::SouthWest,
        ActionType::South,
        ActionType::SouthEast,
    ];

    /// Row/column offset applied by this action.
    #[must_use]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            ActionType::North => (-1, 0),
            ActionType::NorthEast => (-1, 1),
            ActionType::East => (0, 1),
            ActionType::SouthEast => (1, 1),
            ActionType::South => (1, 0),
            ActionType::SouthWest => (1, -1),
            ActionType::West => (0, -1),
            ActionType::NorthWest => (-1, -1),
            ActionType::Stay => (0, 0),
        }
    }

    /// Index of the neighbor this action points at in a 3x3 surroundings.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn index(self) -> usize {
        let (d_row, d_col) = self.delta();
        ((d_col + 1) + (d_row + 1) * 3) as usize
    }

    /// Action pointing at surroundings index `idx`, if `idx < 9`.
    #[must_use]
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::BY_INDEX.get(idx).copied()
    }

    /// Action whose offset is exactly `(d_row, d_col)`.
    #[must_use]
    pub fn from_delta(d_row: i32, d_col: i32) -> Option<Self> {
        if !(-1..=1).contains(&d_row) || !(-1..=1).contains(&d_col) {
            return None;
        }
        let idx = usize::try_from((d_col + 1) + (d_row + 1) * 3).ok()?;
        Self::from_index(idx)
    }

    /// The action that undoes this one.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            ActionType::North => ActionType::South,
            ActionType::NorthEast => ActionType::SouthWest,
            ActionType::East => ActionType::West,
            ActionType::SouthEast => ActionType::NorthWest,
            ActionType::South => ActionType::North,
            ActionType::SouthWest => ActionType::NorthEast,
            ActionType::West => ActionType::East,
            ActionType::NorthWest => ActionType::SouthEast,
            ActionType::Stay => ActionType::Stay,
        }
    }
}
