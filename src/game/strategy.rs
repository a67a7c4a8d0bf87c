//! Decision strategies for agents.
//!
//! A strategy maps the 3x3 [`Surroundings`] of an agent to the action it
//! wants to take. Strategies never see the board itself; the only outside
//! input besides the surroundings is the engine's shared random generator,
//! which is lent to every decision so that a seeded game replays exactly.
//!
//! All built-in strategies work in priority tiers: each tier collects every
//! neighbor index whose type matches, and the first non-empty tier wins with
//! a uniformly random pick among its members.

use rand::RngCore;
use rand::seq::SliceRandom;

use crate::game::rules::AGGRESSION_THRESHOLD;
use crate::game::{ActionType, PieceType, Surroundings};

/// Decision capability consulted once per turn by an agent.
pub trait Strategy {
    /// Short name for logs and debug output.
    fn name(&self) -> &'static str;

    /// Choose an action for the given surroundings.
    fn evaluate(&self, surroundings: &Surroundings, rng: &mut dyn RngCore) -> ActionType;
}

impl<F> Strategy for F
where
    F: Fn(&Surroundings, &mut dyn RngCore) -> ActionType,
{
    fn name(&self) -> &'static str {
        "closure"
    }

    fn evaluate(&self, surroundings: &Surroundings, rng: &mut dyn RngCore) -> ActionType {
        self(surroundings, rng)
    }
}

/// Pick uniformly from the first tier with any matching neighbor.
fn choose_from_tiers(
    surroundings: &Surroundings,
    tiers: &[&[PieceType]],
    rng: &mut dyn RngCore,
) -> ActionType {
    for tier in tiers {
        let candidates = surroundings.indices_of(tier);
        if let Some(&idx) = candidates.choose(rng) {
            return ActionType::from_index(idx).unwrap_or(ActionType::Stay);
        }
    }
    ActionType::Stay
}

const AGENTS: &[PieceType] = &[PieceType::Simple, PieceType::Strategic];
const ADVANTAGE: &[PieceType] = &[PieceType::Advantage];
const FOOD: &[PieceType] = &[PieceType::Food];
const EMPTY: &[PieceType] = &[PieceType::Empty];
const RESOURCES: &[PieceType] = &[PieceType::Advantage, PieceType::Food];
const SIMPLE: &[PieceType] = &[PieceType::Simple];

/// Attacks neighboring agents while its energy is above
/// [`AGGRESSION_THRESHOLD`], otherwise forages: advantage, then food, then
/// any empty cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggressiveAgentStrategy {
    energy: f64,
    threshold: f64,
}

impl AggressiveAgentStrategy {
    /// Create a strategy for an agent with the given energy.
    #[must_use]
    pub const fn new(energy: f64) -> Self {
        Self {
            energy,
            threshold: AGGRESSION_THRESHOLD,
        }
    }

    /// Energy the strategy was configured with.
    #[must_use]
    pub const fn energy(&self) -> f64 {
        self.energy
    }

    /// Energy above which neighboring agents are attacked.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Strategy for AggressiveAgentStrategy {
    fn name(&self) -> &'static str {
        "aggressive"
    }

    fn evaluate(&self, surroundings: &Surroundings, rng: &mut dyn RngCore) -> ActionType {
        if self.energy > self.threshold {
            choose_from_tiers(surroundings, &[AGENTS, ADVANTAGE, FOOD, EMPTY], rng)
        } else {
            choose_from_tiers(surroundings, &[ADVANTAGE, FOOD, EMPTY], rng)
        }
    }
}

/// Forages advantage, then food, then moves to an empty cell, and only
/// challenges a simple agent when nothing else is available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultAgentStrategy;

impl Strategy for DefaultAgentStrategy {
    fn name(&self) -> &'static str {
        "default"
    }

    fn evaluate(&self, surroundings: &Surroundings, rng: &mut dyn RngCore) -> ActionType {
        choose_from_tiers(surroundings, &[ADVANTAGE, FOOD, EMPTY, SIMPLE], rng)
    }
}

/// Behavior of simple agents: any resource, else any empty cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleAgentStrategy;

impl Strategy for SimpleAgentStrategy {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn evaluate(&self, surroundings: &Surroundings, rng: &mut dyn RngCore) -> ActionType {
        choose_from_tiers(surroundings, &[RESOURCES, EMPTY], rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rules::STARTING_AGENT_ENERGY;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn test_threshold_is_three_quarters_of_start() {
        let strategy = AggressiveAgentStrategy::new(STARTING_AGENT_ENERGY);
        assert!((strategy.threshold() - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_aggressive_attacks_when_strong() {
        let strategy = AggressiveAgentStrategy::new(STARTING_AGENT_ENERGY);
        let s = Surroundings::uniform(PieceType::Empty)
            .with(ActionType::East, PieceType::Strategic)
            .with(ActionType::North, PieceType::Advantage);
        let mut rng = rng();
        for _ in 0..50 {
            assert_eq!(strategy.evaluate(&s, &mut rng), ActionType::East);
        }
    }

    #[test]
    fn test_aggressive_only_picks_agents_when_strong() {
        let strategy = AggressiveAgentStrategy::new(STARTING_AGENT_ENERGY);
        let s = Surroundings::uniform(PieceType::Empty)
            .with(ActionType::SouthWest, PieceType::Simple)
            .with(ActionType::NorthEast, PieceType::Strategic);
        let mut rng = rng();
        let mut seen = Vec::new();
        for _ in 0..100 {
            let action = strategy.evaluate(&s, &mut rng);
            assert!(
                matches!(action, ActionType::SouthWest | ActionType::NorthEast),
                "picked {action:?}"
            );
            if !seen.contains(&action) {
                seen.push(action);
            }
        }
        assert_eq!(seen.len(), 2, "both agents should be picked eventually");
    }

    #[test]
    fn test_aggressive_ignores_agents_at_threshold() {
        let strategy = AggressiveAgentStrategy::new(AGGRESSION_THRESHOLD);
        let s = Surroundings::uniform(PieceType::Empty)
            .with(ActionType::East, PieceType::Simple)
            .with(ActionType::South, PieceType::Advantage);
        let mut rng = rng();
        assert_eq!(strategy.evaluate(&s, &mut rng), ActionType::South);
    }

    #[test]
    fn test_aggressive_food_before_empty() {
        let strategy = AggressiveAgentStrategy::new(1.0);
        let s = Surroundings::uniform(PieceType::Empty).with(ActionType::NorthWest, PieceType::Food);
        assert_eq!(strategy.evaluate(&s, &mut rng()), ActionType::NorthWest);
    }

    #[test]
    fn test_aggressive_stays_when_boxed_in() {
        let strategy = AggressiveAgentStrategy::new(1.0);
        let s = Surroundings::uniform(PieceType::Inaccessible).with(ActionType::East, PieceType::Simple);
        assert_eq!(strategy.evaluate(&s, &mut rng()), ActionType::Stay);
    }

    #[test]
    fn test_default_prefers_empty_over_simple() {
        let s = Surroundings::uniform(PieceType::Inaccessible)
            .with(ActionType::West, PieceType::Simple)
            .with(ActionType::South, PieceType::Empty);
        assert_eq!(DefaultAgentStrategy.evaluate(&s, &mut rng()), ActionType::South);

        let s = Surroundings::uniform(PieceType::Strategic).with(ActionType::West, PieceType::Simple);
        assert_eq!(DefaultAgentStrategy.evaluate(&s, &mut rng()), ActionType::West);
    }

    #[test]
    fn test_simple_treats_resources_alike() {
        let s = Surroundings::uniform(PieceType::Empty)
            .with(ActionType::North, PieceType::Food)
            .with(ActionType::South, PieceType::Advantage);
        let mut rng = rng();
        for _ in 0..20 {
            let action = SimpleAgentStrategy.evaluate(&s, &mut rng);
            assert!(matches!(action, ActionType::North | ActionType::South));
        }
    }

    #[test]
    fn test_simple_never_attacks() {
        let s = Surroundings::uniform(PieceType::Strategic);
        assert_eq!(SimpleAgentStrategy.evaluate(&s, &mut rng()), ActionType::Stay);
    }

    #[test]
    fn test_closure_strategy() {
        let always_east = |_: &Surroundings, _: &mut dyn RngCore| ActionType::East;
        assert_eq!(always_east.name(), "closure");
        let s = Surroundings::uniform(PieceType::Empty);
        assert_eq!(always_east.evaluate(&s, &mut rng()), ActionType::East);
    }
}
