//! Deterministic initial board population.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::game::rules::{NUM_INIT_AGENT_FACTOR, NUM_INIT_RESOURCE_FACTOR};
use crate::game::{PieceType, Position};

/// How many pieces of each kind a fresh board receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationPlan {
    /// Strategic agents.
    pub strategic: usize,
    /// Simple agents.
    pub simple: usize,
    /// Food resources.
    pub food: usize,
    /// Advantage resources.
    pub advantage: usize,
}

impl PopulationPlan {
    /// Counts for a `width` x `height` board: a quarter of the cells hold
    /// agents (half of them strategic) and half hold resources (a quarter of
    /// those advantages).
    #[must_use]
    pub fn for_board(width: u16, height: u16) -> Self {
        let cells = usize::from(width) * usize::from(height);
        let agents = cells / NUM_INIT_AGENT_FACTOR;
        let resources = cells / NUM_INIT_RESOURCE_FACTOR;
        let strategic = agents / 2;
        let advantage = resources / 4;
        Self {
            strategic,
            simple: agents - strategic,
            food: resources - advantage,
            advantage,
        }
    }

    /// Total pieces placed.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.strategic + self.simple + self.food + self.advantage
    }
}

/// Choose distinct slots for every piece in `plan` among `free` positions.
///
/// The result is ordered strategic, simple, food, advantage. If there are
/// fewer free positions than pieces, the plan is truncated in that order.
pub fn place_population<R: Rng + ?Sized>(
    plan: &PopulationPlan,
    mut free: Vec<Position>,
    rng: &mut R,
) -> Vec<(Position, PieceType)> {
    free.shuffle(rng);

    let kinds = [
        (PieceType::Strategic, plan.strategic),
        (PieceType::Simple, plan.simple),
        (PieceType::Food, plan.food),
        (PieceType::Advantage, plan.advantage),
    ];

    kinds
        .iter()
        .flat_map(|&(kind, count)| std::iter::repeat_n(kind, count))
        .zip(free)
        .map(|(kind, pos)| (pos, kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::collections::HashSet;

    fn all_positions(width: u16, height: u16) -> Vec<Position> {
        (0..height)
            .flat_map(|row| (0..width).map(move |col| Position::new(row, col)))
            .collect()
    }

    #[test]
    fn test_plan_counts() {
        let plan = PopulationPlan::for_board(10, 10);
        assert_eq!(plan.strategic, 12);
        assert_eq!(plan.simple, 13);
        assert_eq!(plan.advantage, 12);
        assert_eq!(plan.food, 38);
        assert_eq!(plan.total(), 75);
    }

    #[test]
    fn test_plan_small_board() {
        let plan = PopulationPlan::for_board(3, 3);
        assert_eq!(plan.strategic + plan.simple, 2);
        assert_eq!(plan.food + plan.advantage, 4);
    }

    #[test]
    fn test_placement_distinct() {
        let plan = PopulationPlan::for_board(8, 6);
        let mut rng = SmallRng::seed_from_u64(3);
        let placed = place_population(&plan, all_positions(8, 6), &mut rng);
        assert_eq!(placed.len(), plan.total());
        let unique: HashSet<_> = placed.iter().map(|(pos, _)| *pos).collect();
        assert_eq!(unique.len(), placed.len());
    }

    #[test]
    fn test_placement_deterministic() {
        let plan = PopulationPlan::for_board(6, 6);
        let a = place_population(&plan, all_positions(6, 6), &mut SmallRng::seed_from_u64(99));
        let b = place_population(&plan, all_positions(6, 6), &mut SmallRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_placement_truncates() {
        let plan = PopulationPlan::for_board(10, 10);
        let free = vec![Position::new(0, 0), Position::new(0, 1)];
        let placed = place_population(&plan, free, &mut SmallRng::seed_from_u64(1));
        assert_eq!(placed.len(), 2);
        assert!(placed.iter().all(|(_, kind)| *kind == PieceType::Strategic));
    }
}
