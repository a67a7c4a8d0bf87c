//! Game state and the round scheduler.

use std::collections::HashMap;
use std::fmt;
use std::io::Write;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{GameConfig, StrategyKind};
use crate::error::{GameError, GameResult};
use crate::game::invariants::assert_invariants;
use crate::game::population::{PopulationPlan, place_population};
use crate::game::rules::{STARTING_AGENT_ENERGY, STARTING_RESOURCE_CAPACITY};
use crate::game::{
    ActionType, Agent, AggressiveAgentStrategy, DefaultAgentStrategy, Grid, Piece, PieceId,
    PieceKind, PieceType, Position, Resource, ResourceKind, Strategy, Surroundings,
};

/// Lifecycle of a game. Only ever advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Constructed, no round played yet.
    NotStarted,
    /// Rounds are being played.
    Playing,
    /// All resources are gone.
    Over,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::NotStarted => write!(f, "Not Started..."),
            Status::Playing => write!(f, "Playing..."),
            Status::Over => write!(f, "Over!"),
        }
    }
}

/// What happened during one round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    /// Round number this report covers (0-indexed).
    pub round: u32,
    /// Pieces that took their turn. Every piece on the board when the
    /// round starts takes exactly one.
    pub turns: u32,
    /// Pieces that changed slot as actors.
    pub moves: u32,
    /// Collisions resolved.
    pub interactions: u32,
    /// Pieces removed by the viability sweep.
    pub removed: u32,
}

/// Summary of a run loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayOutcome {
    /// Rounds played in total.
    pub rounds: u32,
    /// Status when the loop stopped.
    pub status: Status,
    /// Whether the loop stopped at the round cap rather than at game over.
    pub capped: bool,
}

/// The simulation: board, round counter, status and random generator.
#[derive(Debug)]
pub struct Game {
    /// The board.
    grid: Grid,
    /// Rounds completed.
    round: u32,
    /// Current lifecycle status.
    status: Status,
    /// Single random source lent to every strategy decision.
    rng: SmallRng,
    /// Configuration the game was built from.
    config: GameConfig,
    /// Identifier for the next placed piece.
    next_id: PieceId,
}

impl Game {
    /// Create a game from `config`, populating the board if requested.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Dimension`] if the board is below the minimum
    /// size.
    pub fn new(config: GameConfig) -> GameResult<Self> {
        let grid = Grid::new(config.width, config.height)?;
        let mut game = Self {
            grid,
            round: 0,
            status: Status::NotStarted,
            rng: SmallRng::seed_from_u64(config.seed),
            config,
            next_id: 0,
        };
        if config.populate {
            game.populate()?;
        }
        Ok(game)
    }

    /// Create a game with an empty board to be filled by hand.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Dimension`] if the board is below the minimum
    /// size.
    pub fn manual(width: u16, height: u16) -> GameResult<Self> {
        Self::new(GameConfig::manual(width, height))
    }

    fn populate(&mut self) -> GameResult<()> {
        let plan = PopulationPlan::for_board(self.width(), self.height());
        let free: Vec<Position> = (0..self.grid.len())
            .filter(|&idx| self.grid.slot(idx).is_none())
            .map(|idx| self.grid.position_of(idx))
            .collect();

        for (pos, kind) in place_population(&plan, free, &mut self.rng) {
            match kind {
                PieceType::Strategic => {
                    let strategy: Box<dyn Strategy> = match self.config.strategy {
                        StrategyKind::Default => Box::new(DefaultAgentStrategy),
                        StrategyKind::Aggressive => {
                            Box::new(AggressiveAgentStrategy::new(STARTING_AGENT_ENERGY))
                        }
                    };
                    self.add_strategic_boxed(pos, strategy)?;
                }
                PieceType::Simple => {
                    self.add_simple(pos)?;
                }
                PieceType::Food => {
                    self.add_food(pos)?;
                }
                PieceType::Advantage => {
                    self.add_advantage(pos)?;
                }
                PieceType::Empty | PieceType::Observer | PieceType::Inaccessible => {}
            }
        }

        debug!(pieces = self.num_pieces(), seed = self.config.seed, "populated board");
        Ok(())
    }

    fn place(&mut self, pos: Position, kind: PieceKind) -> GameResult<PieceId> {
        self.grid.check_vacant(pos)?;
        let id = self.next_id;
        self.next_id += 1;
        self.grid.insert(Piece::new(id, pos, kind))?;
        Ok(id)
    }

    /// Place a simple agent with the starting energy.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] or [`GameError::Occupied`].
    pub fn add_simple(&mut self, pos: Position) -> GameResult<PieceId> {
        self.add_simple_with_energy(pos, STARTING_AGENT_ENERGY)
    }

    /// Place a simple agent with the given energy.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] or [`GameError::Occupied`].
    pub fn add_simple_with_energy(&mut self, pos: Position, energy: f64) -> GameResult<PieceId> {
        self.place(pos, PieceKind::Agent(Agent::simple(energy)))
    }

    /// Place a strategic agent with the starting energy.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] or [`GameError::Occupied`].
    pub fn add_strategic<S: Strategy + 'static>(
        &mut self,
        pos: Position,
        strategy: S,
    ) -> GameResult<PieceId> {
        self.add_strategic_boxed(pos, Box::new(strategy))
    }

    /// Place a strategic agent with an already boxed strategy.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] or [`GameError::Occupied`].
    pub fn add_strategic_boxed(
        &mut self,
        pos: Position,
        strategy: Box<dyn Strategy>,
    ) -> GameResult<PieceId> {
        self.place(pos, PieceKind::Agent(Agent::strategic(STARTING_AGENT_ENERGY, strategy)))
    }

    /// Place a strategic agent with the given energy.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] or [`GameError::Occupied`].
    pub fn add_strategic_with_energy<S: Strategy + 'static>(
        &mut self,
        pos: Position,
        energy: f64,
        strategy: S,
    ) -> GameResult<PieceId> {
        self.place(pos, PieceKind::Agent(Agent::strategic(energy, Box::new(strategy))))
    }

    /// Place a food resource with the starting capacity.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] or [`GameError::Occupied`].
    pub fn add_food(&mut self, pos: Position) -> GameResult<PieceId> {
        let resource = Resource::new(ResourceKind::Food, STARTING_RESOURCE_CAPACITY);
        self.place(pos, PieceKind::Resource(resource))
    }

    /// Place an advantage resource with the starting capacity.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] or [`GameError::Occupied`].
    pub fn add_advantage(&mut self, pos: Position) -> GameResult<PieceId> {
        let resource = Resource::new(ResourceKind::Advantage, STARTING_RESOURCE_CAPACITY);
        self.place(pos, PieceKind::Resource(resource))
    }

    /// Board width.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.grid.width()
    }

    /// Board height.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.grid.height()
    }

    /// Rounds completed so far.
    #[must_use]
    pub const fn round_number(&self) -> u32 {
        self.round
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Configuration the game was built from.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only view of the board.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Piece at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] or [`GameError::EmptySlot`].
    pub fn piece(&self, pos: Position) -> GameResult<&Piece> {
        self.grid.piece(pos)
    }

    fn count_where(&self, pred: impl Fn(&Piece) -> bool) -> usize {
        self.grid.occupied().filter(|&(_, piece)| pred(piece)).count()
    }

    /// Pieces on the board.
    #[must_use]
    pub fn num_pieces(&self) -> usize {
        self.count_where(|_| true)
    }

    /// Agents on the board.
    #[must_use]
    pub fn num_agents(&self) -> usize {
        self.count_where(Piece::is_agent)
    }

    /// Simple agents on the board.
    #[must_use]
    pub fn num_simple(&self) -> usize {
        self.count_where(|piece| piece.piece_type() == PieceType::Simple)
    }

    /// Strategic agents on the board.
    #[must_use]
    pub fn num_strategic(&self) -> usize {
        self.count_where(|piece| piece.piece_type() == PieceType::Strategic)
    }

    /// Resources on the board.
    #[must_use]
    pub fn num_resources(&self) -> usize {
        self.count_where(Piece::is_resource)
    }

    /// Surroundings of `pos` as a piece standing there would sense them.
    #[must_use]
    pub fn surroundings(&self, pos: Position) -> Surroundings {
        self.grid.surroundings(pos)
    }

    /// Whether `action` from `pos` stays on the board.
    #[must_use]
    pub fn is_legal(&self, action: ActionType, pos: Position) -> bool {
        self.grid.is_legal(action, pos)
    }

    /// Destination of `action` from `pos`, or `pos` if it would leave the board.
    #[must_use]
    pub fn move_from(&self, pos: Position, action: ActionType) -> Position {
        self.grid.move_from(pos, action)
    }

    /// Action leading from `from` to the adjacent position `to`.
    #[must_use]
    pub fn reach_surroundings(from: Position, to: Position) -> ActionType {
        Grid::reach_surroundings(from, to)
    }

    /// Begin play. Has no effect once the game has started.
    pub fn start(&mut self) {
        if self.status == Status::NotStarted {
            self.status = Status::Playing;
            info!(
                width = self.width(),
                height = self.height(),
                agents = self.num_agents(),
                resources = self.num_resources(),
                "game started"
            );
        }
    }

    /// Play one round.
    ///
    /// Every piece present at the start of the round acts at most once, in
    /// row-major order of its starting slot, even if it is moved by
    /// another piece's interaction before its turn. Afterwards non-viable
    /// pieces are removed and the game ends if no resources remain.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotPlaying`] unless the status is
    /// [`Status::Playing`].
    pub fn round(&mut self) -> GameResult<RoundReport> {
        if self.status != Status::Playing {
            return Err(GameError::NotPlaying {
                status: self.status,
            });
        }

        let mut report = RoundReport {
            round: self.round,
            ..RoundReport::default()
        };

        // Snapshot identities before anyone moves.
        let mut order = Vec::new();
        let mut locator: HashMap<PieceId, usize> = HashMap::new();
        for idx in 0..self.grid.len() {
            if let Some(piece) = self.grid.slot_mut(idx) {
                piece.set_turned(false);
                order.push(piece.id());
                locator.insert(piece.id(), idx);
            }
        }

        for id in order {
            self.play_turn(id, &mut locator, &mut report);
        }
        report.removed = self.sweep();

        if self.num_resources() == 0 {
            self.status = Status::Over;
            info!(round = self.round, survivors = self.num_agents(), "game over");
        }
        self.round += 1;

        assert_invariants(self);
        Ok(report)
    }

    /// Let the piece `id` act, unless it already did this round.
    fn play_turn(
        &mut self,
        id: PieceId,
        locator: &mut HashMap<PieceId, usize>,
        report: &mut RoundReport,
    ) {
        let Some(&origin) = locator.get(&id) else {
            return;
        };
        let Some(piece) = self.grid.slot_mut(origin) else {
            return;
        };
        if piece.turned() {
            return;
        }
        piece.set_turned(true);
        report.turns += 1;

        // Finished pieces still act; only the sweep removes them.
        piece.age();
        let from = piece.position();

        let action = match self.grid.slot(origin) {
            Some(piece) if piece.is_agent() => {
                let surroundings = self.grid.surroundings(from);
                piece.take_turn(&surroundings, &mut self.rng)
            }
            _ => ActionType::Stay,
        };

        let to = self.grid.move_from(from, action);
        if to == from {
            return;
        }
        let Some(dest) = self.grid.index_of(to) else {
            return;
        };

        if self.grid.slot(dest).is_none() {
            if let Some(actor) = self.grid.slot_mut(origin) {
                actor.set_position(to);
            }
            self.grid.swap(origin, dest);
            locator.insert(id, dest);
            report.moves += 1;
            debug!(round = self.round, piece = id, ?action, "moved");
            return;
        }

        let Some((actor, occupant)) = self.grid.pair_mut(origin, dest) else {
            return;
        };
        let outcome = actor.interact(occupant);
        report.interactions += 1;
        debug!(
            round = self.round,
            piece = id,
            target = occupant.id(),
            ?action,
            ?outcome,
            "interaction"
        );

        if outcome.relocates() {
            actor.set_position(to);
            occupant.set_position(from);
            let occupant_id = occupant.id();
            self.grid.swap(origin, dest);
            locator.insert(id, dest);
            locator.insert(occupant_id, origin);
            report.moves += 1;
        }
    }

    /// Remove every non-viable piece, returning how many were removed.
    fn sweep(&mut self) -> u32 {
        let mut removed = 0;
        for idx in 0..self.grid.len() {
            if let Some(piece) = self.grid.take_if(idx, |piece| !piece.is_viable()) {
                debug!(
                    round = self.round,
                    piece = piece.id(),
                    kind = ?piece.piece_type(),
                    "removed"
                );
                removed += 1;
            }
        }
        removed
    }

    fn drive<F>(&mut self, mut after_round: F) -> GameResult<PlayOutcome>
    where
        F: FnMut(&Self) -> GameResult<()>,
    {
        self.start();
        let mut capped = false;
        while self.status != Status::Over {
            if self.config.max_rounds.is_some_and(|cap| self.round >= cap) {
                warn!(rounds = self.round, resources = self.num_resources(), "round cap reached");
                capped = true;
                break;
            }
            self.round()?;
            after_round(self)?;
        }
        Ok(PlayOutcome {
            rounds: self.round,
            status: self.status,
            capped,
        })
    }

    /// Play until the game is over or the round cap is hit, without
    /// rendering.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Game::round`].
    pub fn run(&mut self) -> GameResult<PlayOutcome> {
        self.drive(|_| Ok(()))
    }

    /// Play until the game is over or the round cap is hit, writing the
    /// initial board, every round's board when `verbose`, and the final
    /// board otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Io`] if writing to `out` fails.
    pub fn play<W: Write>(&mut self, out: &mut W, verbose: bool) -> GameResult<PlayOutcome> {
        self.start();
        write!(out, "{self}")?;
        let shown = self.round;
        let outcome = self.drive(|game| {
            if verbose {
                write!(out, "{game}")?;
            }
            Ok(())
        })?;
        if !verbose && self.round != shown {
            write!(out, "{self}")?;
        }
        Ok(outcome)
    }
}
