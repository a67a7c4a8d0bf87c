//! Game layer for Forage.
//!
//! Implements the simulation on a bounded grid:
//! - Grid of slots holding agents and resources
//! - Pieces with energy/capacity that decay every turn
//! - Pluggable agent strategies driven by 3x3 surroundings
//! - Round scheduler with collision resolution and a viability sweep
//! - Text rendering and debug invariants

mod grid;
mod invariants;
mod piece;
mod population;
mod position;
mod render;
pub mod rules;
mod state;
mod strategy;
mod surroundings;

pub use grid::Grid;
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use piece::{Agent, AgentKind, Interaction, Piece, PieceId, PieceKind, Resource, ResourceKind};
pub use population::{PopulationPlan, place_population};
pub use position::{ActionType, Position};
pub use render::CELL_WIDTH;
pub use state::{Game, PlayOutcome, RoundReport, Status};
pub use strategy::{AggressiveAgentStrategy, DefaultAgentStrategy, SimpleAgentStrategy, Strategy};
pub use surroundings::{PieceType, Surroundings};
