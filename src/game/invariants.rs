//! Board invariants - sanity checks that detect scheduler bugs.
//!
//! These should never trigger after a completed round. If they do, the
//! round scheduler has broken the slot/position bookkeeping.

use std::collections::HashSet;

use crate::game::{Game, Status};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all board invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
/// Only meaningful between rounds.
#[must_use]
pub fn check_invariants(game: &Game) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut seen = HashSet::new();
    let grid = game.grid();

    for (idx, piece) in grid.occupied() {
        let slot_pos = grid.position_of(idx);
        if piece.position() != slot_pos {
            violations.push(InvariantViolation {
                message: format!(
                    "Piece {} stored at {:?} but occupies {:?}",
                    piece.id(),
                    piece.position(),
                    slot_pos
                ),
            });
        }

        if !seen.insert(piece.id()) {
            violations.push(InvariantViolation {
                message: format!("Piece {} occupies more than one slot", piece.id()),
            });
        }

        // Sweeps run at the end of every round.
        if game.round_number() > 0 && !piece.is_viable() {
            violations.push(InvariantViolation {
                message: format!("Non-viable piece {} survived the sweep", piece.id()),
            });
        }
    }

    let resources = game.num_resources();
    match game.status() {
        Status::Over if resources > 0 => violations.push(InvariantViolation {
            message: format!("Game over with {resources} resources left"),
        }),
        Status::Playing if game.round_number() > 0 && resources == 0 => {
            violations.push(InvariantViolation {
                message: "Still playing with no resources left".to_string(),
            });
        }
        _ => {}
    }

    violations
}

/// Assert all board invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(game: &Game) {
    let violations = check_invariants(game);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Board invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_game: &Game) {}
