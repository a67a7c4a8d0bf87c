#![no_main]

//! Round scheduler fuzzer.
//!
//! Builds an arbitrary board (size, pieces, energies, scripted strategies)
//! and plays rounds, checking after each one that:
//! 1. Every snapshotted piece took exactly one turn
//! 2. Stored positions match occupied slots
//! 3. Status only advances and matches the resource count

use arbitrary::Arbitrary;
use forage::game::{
    ActionType, AggressiveAgentStrategy, DefaultAgentStrategy, Game, Position, Status,
    Surroundings, check_invariants,
};
use forage::GameConfig;
use libfuzzer_sys::fuzz_target;
use rand::RngCore;

/// A fuzzer-generated piece placement.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzPiece {
    /// Simple agent with custom energy.
    Simple { row: u8, col: u8, energy: u16 },
    /// Strategic agent with the default strategy.
    Default { row: u8, col: u8 },
    /// Strategic agent with the aggressive strategy.
    Aggressive { row: u8, col: u8, energy: u16 },
    /// Strategic agent that always plays the same action.
    Scripted { row: u8, col: u8, action: u8 },
    /// Food resource.
    Food { row: u8, col: u8 },
    /// Advantage resource.
    Advantage { row: u8, col: u8 },
}

/// Structured input for round fuzzing.
#[derive(Arbitrary, Debug)]
struct RoundInput {
    /// Board width before clamping.
    width: u8,
    /// Board height before clamping.
    height: u8,
    /// Seed for the engine's generator.
    seed: u64,
    /// Pieces to place; failed inserts are ignored.
    pieces: Vec<FuzzPiece>,
    /// Number of rounds to play.
    num_rounds: u8,
}

fuzz_target!(|input: RoundInput| {
    // Cap values to avoid excessive runtime
    let width = u16::from(input.width % 14) + 3;
    let height = u16::from(input.height % 14) + 3;
    let config = GameConfig {
        seed: input.seed,
        ..GameConfig::manual(width, height)
    };
    let Ok(mut game) = Game::new(config) else {
        return;
    };

    let at = |row: u8, col: u8| Position::new(u16::from(row) % height, u16::from(col) % width);
    for piece in input.pieces.into_iter().take(64) {
        let _ = match piece {
            FuzzPiece::Simple { row, col, energy } => {
                game.add_simple_with_energy(at(row, col), f64::from(energy))
            }
            FuzzPiece::Default { row, col } => game.add_strategic(at(row, col), DefaultAgentStrategy),
            FuzzPiece::Aggressive { row, col, energy } => game.add_strategic(
                at(row, col),
                AggressiveAgentStrategy::new(f64::from(energy)),
            ),
            FuzzPiece::Scripted { row, col, action } => {
                let action = ActionType::BY_INDEX[usize::from(action) % 9];
                game.add_strategic(at(row, col), move |_: &Surroundings, _: &mut dyn RngCore| {
                    action
                })
            }
            FuzzPiece::Food { row, col } => game.add_food(at(row, col)),
            FuzzPiece::Advantage { row, col } => game.add_advantage(at(row, col)),
        };
    }

    let violations = check_invariants(&game);
    assert!(violations.is_empty(), "Invariants violated at start: {violations:?}");

    game.start();
    for round in 0..(input.num_rounds % 32) {
        if game.status() != Status::Playing {
            break;
        }
        let before = game.num_pieces();
        let report = game.round().expect("round while playing");
        assert_eq!(report.turns as usize, before, "round {round}");

        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "Invariants violated after round {round}: {violations:?}");
        assert_eq!(game.status() == Status::Over, game.num_resources() == 0);
    }
});
