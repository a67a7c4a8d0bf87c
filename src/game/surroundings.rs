//! The 3x3 neighborhood an agent senses before deciding.

use serde::{Deserialize, Serialize};

use crate::game::ActionType;

/// Kind of content reported for a neighborhood cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    /// In-bounds cell with no piece.
    Empty,
    /// Simple agent.
    Simple,
    /// Strategic agent.
    Strategic,
    /// Food resource.
    Food,
    /// Advantage resource.
    Advantage,
    /// The observing piece itself (always the center cell).
    Observer,
    /// Cell beyond the board edge.
    Inaccessible,
}

impl PieceType {
    /// Whether this type denotes an agent.
    #[must_use]
    pub const fn is_agent(self) -> bool {
        matches!(self, PieceType::Simple | PieceType::Strategic)
    }

    /// Whether this type denotes a resource.
    #[must_use]
    pub const fn is_resource(self) -> bool {
        matches!(self, PieceType::Food | PieceType::Advantage)
    }
}

/// Snapshot of the nine cells centered on an observer, in row-major order
/// (NW, N, NE, W, center, E, SW, S, SE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Surroundings {
    /// Cell contents in row-major order.
    pub cells: [PieceType; 9],
}

impl Surroundings {
    /// Index of the observer's own cell.
    pub const CENTER: usize = 4;

    /// Build surroundings from raw cells; the center is forced to
    /// [`PieceType::Observer`].
    #[must_use]
    pub const fn new(mut cells: [PieceType; 9]) -> Self {
        cells[Self::CENTER] = PieceType::Observer;
        Self { cells }
    }

    /// Surroundings with every neighbor of the given type.
    #[must_use]
    pub const fn uniform(piece_type: PieceType) -> Self {
        Self::new([piece_type; 9])
    }

    /// Replace the cell in the direction of `action`. The center cannot be
    /// overwritten.
    #[must_use]
    pub const fn with(mut self, action: ActionType, piece_type: PieceType) -> Self {
        let idx = action.index();
        if idx != Self::CENTER {
            self.cells[idx] = piece_type;
        }
        self
    }

    /// Content of the cell at `idx`.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<PieceType> {
        self.cells.get(idx).copied()
    }

    /// Content of the cell `action` points at.
    #[must_use]
    pub const fn toward(&self, action: ActionType) -> PieceType {
        self.cells[action.index()]
    }

    /// All indices whose content is one of `types`, in ascending order.
    #[must_use]
    pub fn indices_of(&self, types: &[PieceType]) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| types.contains(cell))
            .map(|(idx, _)| idx)
            .collect()
    }
}
