//! Multi-round integration tests for the simulation.
//!
//! These tests verify that games run to completion deterministically and
//! that configuration files drive construction.
//!
//! Run with: cargo test --release game_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::io::Write;

use forage::game::{
    ActionType, AggressiveAgentStrategy, DefaultAgentStrategy, Game, Position, Status, Strategy,
    check_invariants,
};
use forage::{ConfigError, GameConfig, GameError, StrategyKind};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn seeded(seed: u64) -> GameConfig {
    GameConfig {
        seed,
        ..GameConfig::default()
    }
}

#[test]
fn test_same_seed_same_game() {
    let mut a = Game::new(seeded(12345)).unwrap();
    let mut b = Game::new(seeded(12345)).unwrap();
    assert_eq!(a.to_string(), b.to_string());

    let outcome_a = a.run().unwrap();
    let outcome_b = b.run().unwrap();
    assert_eq!(outcome_a, outcome_b);
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn test_seed_changes_layout() {
    let a = Game::new(seeded(1)).unwrap();
    let b = Game::new(seeded(2)).unwrap();
    assert_ne!(a.to_string(), b.to_string());
}

#[test]
fn test_multiple_seeds_terminate() {
    for seed in 0..20 {
        let mut game = Game::new(seeded(seed)).unwrap();
        let outcome = game.run().unwrap();
        assert_eq!(outcome.status, Status::Over, "seed {seed}");
        assert!(!outcome.capped);
        // Unconsumed resources spoil within ten rounds.
        assert!(outcome.rounds <= 10, "seed {seed}: {} rounds", outcome.rounds);
        assert_eq!(game.num_resources(), 0);
        assert!(check_invariants(&game).is_empty());
    }
}

#[test]
fn test_aggressive_population() {
    let config = GameConfig {
        width: 16,
        height: 12,
        seed: 77,
        strategy: StrategyKind::Aggressive,
        ..GameConfig::default()
    };
    let mut game = Game::new(config).unwrap();
    assert_eq!(game.num_strategic(), 24);
    game.start();
    while game.status() == Status::Playing {
        let before = game.num_pieces();
        let report = game.round().unwrap();
        assert_eq!(report.turns as usize, before);
        assert_eq!(before - game.num_pieces(), report.removed as usize);
        assert!(check_invariants(&game).is_empty());
    }
}

#[test]
fn test_status_lifecycle() {
    let mut game = Game::manual(3, 3).unwrap();
    game.add_food(Position::new(2, 2)).unwrap();
    assert_eq!(game.status(), Status::NotStarted);
    assert!(matches!(game.round(), Err(GameError::NotPlaying { .. })));

    game.start();
    assert_eq!(game.status(), Status::Playing);
    while game.status() == Status::Playing {
        game.round().unwrap();
    }
    assert_eq!(game.status(), Status::Over);
    game.start();
    assert_eq!(game.status(), Status::Over);
    assert!(matches!(
        game.round(),
        Err(GameError::NotPlaying { status: Status::Over })
    ));
}

#[test]
fn test_food_northwest_scenario() {
    let mut game = Game::manual(3, 3).unwrap();
    let agent = game.add_strategic(Position::new(1, 1), DefaultAgentStrategy).unwrap();
    game.add_food(Position::new(0, 0)).unwrap();

    let surroundings = game.surroundings(Position::new(1, 1));
    let weak = AggressiveAgentStrategy::new(10.0);
    let mut rng = SmallRng::seed_from_u64(0);
    assert_eq!(weak.evaluate(&surroundings, &mut rng), ActionType::NorthWest);

    game.start();
    let report = game.round().unwrap();
    assert_eq!(report.interactions, 1);
    let piece = game.piece(Position::new(0, 0)).unwrap();
    assert_eq!(piece.id(), agent);
    assert_eq!(game.status(), Status::Over);
}

#[test]
fn test_narrow_board_rejected() {
    let err = Game::manual(2, 5).unwrap_err();
    assert!(matches!(
        err,
        GameError::Dimension {
            width: 2,
            height: 5,
            ..
        }
    ));
    assert!(err.to_string().contains("2x5"));
}

#[test]
fn test_config_file_loading() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"width": 5, "height": 4, "seed": 3, "strategy": "aggressive"}}"#).unwrap();

    let config = GameConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.width, 5);
    assert_eq!(config.height, 4);
    assert_eq!(config.seed, 3);
    assert_eq!(config.strategy, StrategyKind::Aggressive);
    assert_eq!(config.max_rounds, Some(1000));
    assert!(config.populate);

    let game = Game::new(config).unwrap();
    assert_eq!(game.num_agents(), 5);
    assert_eq!(game.num_resources(), 10);
}

#[test]
fn test_config_file_errors() {
    let dir = tempfile::tempdir().unwrap();

    let bad_json = dir.path().join("bad.json");
    std::fs::write(&bad_json, "{ width: 5").unwrap();
    assert!(matches!(
        GameConfig::from_json_file(&bad_json),
        Err(ConfigError::Parse(_))
    ));

    let too_small = dir.path().join("small.json");
    std::fs::write(&too_small, r#"{"width": 2}"#).unwrap();
    assert!(matches!(
        GameConfig::from_json_file(&too_small),
        Err(ConfigError::Invalid(_))
    ));

    assert!(matches!(
        GameConfig::from_json_file(&dir.path().join("missing.json")),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_verbose_play_prints_every_round() {
    let mut game = Game::new(seeded(5)).unwrap();
    let mut out = Vec::new();
    let outcome = game.play(&mut out, true).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches("Round ").count(), outcome.rounds as usize + 1);
    assert!(text.starts_with("Round 0:\n"));
    assert!(text.trim_end().ends_with("Status: Over!"));
}
