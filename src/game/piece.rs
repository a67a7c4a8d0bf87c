//! Pieces that occupy board slots: agents and resources.

use std::cmp::Ordering;
use std::fmt;

use rand::RngCore;

use crate::game::rules::{ADVANTAGE_MULT_FACTOR, AGENT_FATIGUE_RATE, RESOURCE_SPOIL_FACTOR};
use crate::game::{ActionType, PieceType, Position, SimpleAgentStrategy, Strategy, Surroundings};

/// Stable identifier assigned to a piece when it is placed.
pub type PieceId = u32;

/// Flavor of agent, reported in surroundings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    /// Forager with a fixed built-in behavior.
    Simple,
    /// Agent driven by an injected strategy.
    Strategic,
}

/// Flavor of resource, reported in surroundings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Plain food.
    Food,
    /// Food that yields more than its capacity.
    Advantage,
}

/// An active piece: has energy and decides an action every round.
pub struct Agent {
    kind: AgentKind,
    energy: f64,
    strategy: Box<dyn Strategy>,
}

impl Agent {
    /// Create a simple agent.
    #[must_use]
    pub fn simple(energy: f64) -> Self {
        Self {
            kind: AgentKind::Simple,
            energy,
            strategy: Box::new(SimpleAgentStrategy),
        }
    }

    /// Create a strategic agent driven by `strategy`.
    #[must_use]
    pub fn strategic(energy: f64, strategy: Box<dyn Strategy>) -> Self {
        Self {
            kind: AgentKind::Strategic,
            energy,
            strategy,
        }
    }

    /// Kind of this agent.
    #[must_use]
    pub const fn kind(&self) -> AgentKind {
        self.kind
    }

    /// Current energy.
    #[must_use]
    pub const fn energy(&self) -> f64 {
        self.energy
    }

    /// Name of the strategy in use.
    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Ask the strategy for this round's action.
    pub fn decide(&self, surroundings: &Surroundings, rng: &mut dyn RngCore) -> ActionType {
        self.strategy.evaluate(surroundings, rng)
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("kind", &self.kind)
            .field("energy", &self.energy)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

/// A passive piece consumed by agents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resource {
    kind: ResourceKind,
    capacity: f64,
}

impl Resource {
    /// Create a resource.
    #[must_use]
    pub const fn new(kind: ResourceKind, capacity: f64) -> Self {
        Self { kind, capacity }
    }

    /// Kind of this resource.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Remaining raw capacity.
    #[must_use]
    pub const fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Energy an agent gains by consuming this resource now.
    #[must_use]
    pub fn yield_amount(&self) -> f64 {
        match self.kind {
            ResourceKind::Food => self.capacity,
            ResourceKind::Advantage => self.capacity * ADVANTAGE_MULT_FACTOR,
        }
    }

    /// Drain the resource, returning the energy it yields.
    fn consume(&mut self) -> f64 {
        let amount = self.yield_amount();
        self.capacity = 0.0;
        amount
    }
}

/// Variant payload of a piece.
#[derive(Debug)]
pub enum PieceKind {
    /// An agent.
    Agent(Agent),
    /// A resource.
    Resource(Resource),
}

/// How a collision between an acting piece and an occupant resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interaction {
    /// The actor could not take the slot; nobody moves.
    Rejected,
    /// The actor defeated an agent and trades places with it.
    Swapped,
    /// The actor ate a resource and trades places with its remains.
    Consumed,
}

impl Interaction {
    /// Whether the actor ends up in the contested slot.
    #[must_use]
    pub const fn relocates(self) -> bool {
        matches!(self, Interaction::Swapped | Interaction::Consumed)
    }
}

/// Anything occupying a board slot.
#[derive(Debug)]
pub struct Piece {
    id: PieceId,
    position: Position,
    turned: bool,
    finished: bool,
    kind: PieceKind,
}

impl Piece {
    /// Create a piece at `position`.
    #[must_use]
    pub const fn new(id: PieceId, position: Position, kind: PieceKind) -> Self {
        Self {
            id,
            position,
            turned: false,
            finished: false,
            kind,
        }
    }

    /// Identifier of this piece.
    #[must_use]
    pub const fn id(&self) -> PieceId {
        self.id
    }

    /// Stored position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Update the stored position.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Whether this piece has already acted this round.
    #[must_use]
    pub const fn turned(&self) -> bool {
        self.turned
    }

    /// Set the per-round acted flag.
    pub fn set_turned(&mut self, turned: bool) {
        self.turned = turned;
    }

    /// Variant payload.
    #[must_use]
    pub const fn kind(&self) -> &PieceKind {
        &self.kind
    }

    /// The agent payload, if this is an agent.
    #[must_use]
    pub const fn as_agent(&self) -> Option<&Agent> {
        match &self.kind {
            PieceKind::Agent(agent) => Some(agent),
            PieceKind::Resource(_) => None,
        }
    }

    /// The resource payload, if this is a resource.
    #[must_use]
    pub const fn as_resource(&self) -> Option<&Resource> {
        match &self.kind {
            PieceKind::Agent(_) => None,
            PieceKind::Resource(resource) => Some(resource),
        }
    }

    /// Whether this piece is an agent.
    #[must_use]
    pub const fn is_agent(&self) -> bool {
        matches!(self.kind, PieceKind::Agent(_))
    }

    /// Whether this piece is a resource.
    #[must_use]
    pub const fn is_resource(&self) -> bool {
        matches!(self.kind, PieceKind::Resource(_))
    }

    /// Type reported for this piece in a neighbor's surroundings.
    #[must_use]
    pub const fn piece_type(&self) -> PieceType {
        match &self.kind {
            PieceKind::Agent(agent) => match agent.kind {
                AgentKind::Simple => PieceType::Simple,
                AgentKind::Strategic => PieceType::Strategic,
            },
            PieceKind::Resource(resource) => match resource.kind {
                ResourceKind::Food => PieceType::Food,
                ResourceKind::Advantage => PieceType::Advantage,
            },
        }
    }

    /// Whether this piece lost an interaction or was drained.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Mark this piece for removal at the end of the round.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Whether this piece stays on the board after the round's sweep.
    #[must_use]
    pub fn is_viable(&self) -> bool {
        if self.finished {
            return false;
        }
        match &self.kind {
            PieceKind::Agent(agent) => agent.energy > 0.0,
            PieceKind::Resource(resource) => resource.capacity > 0.0,
        }
    }

    /// Advance one round: agents tire, resources spoil.
    pub fn age(&mut self) {
        match &mut self.kind {
            PieceKind::Agent(agent) => {
                agent.energy = (agent.energy - AGENT_FATIGUE_RATE).max(0.0);
            }
            PieceKind::Resource(resource) => {
                resource.capacity = (resource.capacity - RESOURCE_SPOIL_FACTOR).max(0.0);
            }
        }
    }

    /// Action this piece takes given its surroundings. Resources always stay.
    pub fn take_turn(&self, surroundings: &Surroundings, rng: &mut dyn RngCore) -> ActionType {
        match &self.kind {
            PieceKind::Agent(agent) => agent.decide(surroundings, rng),
            PieceKind::Resource(_) => ActionType::Stay,
        }
    }

    /// Resolve this piece moving onto `occupant`.
    ///
    /// Agents fight by energy: the stronger one survives with the
    /// difference and a tie finishes both. An agent moving onto a resource
    /// absorbs its yield.
    pub fn interact(&mut self, occupant: &mut Piece) -> Interaction {
        match (&mut self.kind, &mut occupant.kind) {
            (PieceKind::Agent(actor), PieceKind::Agent(target)) => {
                match actor.energy.total_cmp(&target.energy) {
                    Ordering::Greater => {
                        actor.energy -= target.energy;
                        occupant.finished = true;
                        Interaction::Swapped
                    }
                    Ordering::Less => {
                        target.energy -= actor.energy;
                        self.finished = true;
                        Interaction::Rejected
                    }
                    Ordering::Equal => {
                        self.finished = true;
                        occupant.finished = true;
                        Interaction::Rejected
                    }
                }
            }
            (PieceKind::Agent(actor), PieceKind::Resource(resource)) => {
                actor.energy += resource.consume();
                occupant.finished = true;
                Interaction::Consumed
            }
            (PieceKind::Resource(_), _) => Interaction::Rejected,
        }
    }

    /// Short label used in board renders.
    #[must_use]
    pub fn token(&self) -> String {
        let prefix = match self.piece_type() {
            PieceType::Simple => 'S',
            PieceType::Strategic => 'T',
            PieceType::Food => 'F',
            PieceType::Advantage => 'D',
            PieceType::Empty | PieceType::Observer | PieceType::Inaccessible => '?',
        };
        format!("{prefix}{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::DefaultAgentStrategy;

    fn simple(id: PieceId, energy: f64) -> Piece {
        Piece::new(id, Position::new(0, 0), PieceKind::Agent(Agent::simple(energy)))
    }

    fn strategic(id: PieceId, energy: f64) -> Piece {
        Piece::new(
            id,
            Position::new(0, 1),
            PieceKind::Agent(Agent::strategic(energy, Box::new(DefaultAgentStrategy))),
        )
    }

    fn resource(id: PieceId, kind: ResourceKind, capacity: f64) -> Piece {
        Piece::new(id, Position::new(1, 0), PieceKind::Resource(Resource::new(kind, capacity)))
    }

    fn energy(piece: &Piece) -> f64 {
        piece.as_agent().map_or(f64::NAN, Agent::energy)
    }

    #[test]
    fn test_piece_types() {
        assert_eq!(simple(1, 5.0).piece_type(), PieceType::Simple);
        assert_eq!(strategic(2, 5.0).piece_type(), PieceType::Strategic);
        assert_eq!(resource(3, ResourceKind::Food, 1.0).piece_type(), PieceType::Food);
        assert_eq!(
            resource(4, ResourceKind::Advantage, 1.0).piece_type(),
            PieceType::Advantage
        );
    }

    #[test]
    fn test_stronger_actor_swaps() {
        let mut actor = strategic(1, 20.0);
        let mut target = simple(2, 5.0);
        assert_eq!(actor.interact(&mut target), Interaction::Swapped);
        assert!((energy(&actor) - 15.0).abs() < 1e-9);
        assert!(actor.is_viable());
        assert!(!target.is_viable());
    }

    #[test]
    fn test_weaker_actor_rejected() {
        let mut actor = simple(1, 4.0);
        let mut target = strategic(2, 10.0);
        assert_eq!(actor.interact(&mut target), Interaction::Rejected);
        assert!(!actor.is_viable());
        assert!((energy(&target) - 6.0).abs() < 1e-9);
        assert!(target.is_viable());
    }

    #[test]
    fn test_tie_finishes_both() {
        let mut actor = simple(1, 7.0);
        let mut target = simple(2, 7.0);
        assert_eq!(actor.interact(&mut target), Interaction::Rejected);
        assert!(!actor.is_viable());
        assert!(!target.is_viable());
    }

    #[test]
    fn test_agent_consumes_food() {
        let mut actor = simple(1, 5.0);
        let mut food = resource(2, ResourceKind::Food, 10.0);
        assert_eq!(actor.interact(&mut food), Interaction::Consumed);
        assert!((energy(&actor) - 15.0).abs() < 1e-9);
        assert!(!food.is_viable());
    }

    #[test]
    fn test_advantage_yields_double() {
        let mut actor = simple(1, 5.0);
        let mut advantage = resource(2, ResourceKind::Advantage, 10.0);
        assert_eq!(actor.interact(&mut advantage), Interaction::Consumed);
        assert!((energy(&actor) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_resource_never_wins() {
        let mut food = resource(1, ResourceKind::Food, 10.0);
        let mut agent = simple(2, 5.0);
        assert_eq!(food.interact(&mut agent), Interaction::Rejected);
        assert!(food.is_viable());
        assert!(agent.is_viable());
    }

    #[test]
    fn test_aging() {
        let mut agent = simple(1, AGENT_FATIGUE_RATE);
        agent.age();
        assert!(!agent.is_viable());

        let mut food = resource(2, ResourceKind::Food, 2.0);
        food.age();
        assert!(food.is_viable());
        food.age();
        assert!(!food.is_viable());
    }

    #[test]
    fn test_tokens() {
        assert_eq!(simple(12, 1.0).token(), "S12");
        assert_eq!(strategic(3, 1.0).token(), "T3");
        assert_eq!(resource(40, ResourceKind::Food, 1.0).token(), "F40");
        assert_eq!(resource(5, ResourceKind::Advantage, 1.0).token(), "D5");
    }

    #[test]
    fn test_relocates() {
        assert!(Interaction::Swapped.relocates());
        assert!(Interaction::Consumed.relocates());
        assert!(!Interaction::Rejected.relocates());
    }
}
