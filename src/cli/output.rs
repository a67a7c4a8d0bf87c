//! Output formatting utilities for CLI.

use forage::{Game, PlayOutcome};
use serde::Serialize;
use std::fmt::Write;

/// JSON-serializable single game result.
#[derive(Debug, Serialize)]
pub(super) struct JsonRunSummary {
    /// Random seed used.
    pub(super) seed: u64,
    /// Board width.
    pub(super) width: u16,
    /// Board height.
    pub(super) height: u16,
    /// Total rounds played.
    pub(super) rounds: u32,
    /// Final status.
    pub(super) status: String,
    /// Whether the round cap stopped the game.
    pub(super) capped: bool,
    /// Remaining pieces by kind.
    pub(super) remaining: JsonRemaining,
}

/// JSON-serializable piece counts.
#[derive(Debug, Serialize)]
pub(super) struct JsonRemaining {
    /// Simple agents.
    pub(super) simple: usize,
    /// Strategic agents.
    pub(super) strategic: usize,
    /// Resources of either kind.
    pub(super) resources: usize,
}

impl JsonRunSummary {
    /// Create from a finished game.
    pub(super) fn from_game(game: &Game, outcome: &PlayOutcome) -> Self {
        Self {
            seed: game.config().seed,
            width: game.width(),
            height: game.height(),
            rounds: outcome.rounds,
            status: outcome.status.to_string(),
            capped: outcome.capped,
            remaining: JsonRemaining {
                simple: game.num_simple(),
                strategic: game.num_strategic(),
                resources: game.num_resources(),
            },
        }
    }
}

/// Format a single game result as human-readable text.
pub(super) fn format_text(game: &Game, outcome: &PlayOutcome) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Game Result (seed: {})", game.config().seed);
    let _ = writeln!(output, "  Rounds: {}", outcome.rounds);
    let _ = write!(output, "  Status: {}", outcome.status);
    if outcome.capped {
        output.push_str(" [round cap reached]");
    }
    output.push('\n');
    let _ = writeln!(
        output,
        "  Remaining: {} simple, {} strategic, {} resources",
        game.num_simple(),
        game.num_strategic(),
        game.num_resources()
    );

    output
}

/// Aggregated results across many games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct BatchStats {
    /// Total games played.
    pub(super) games_played: u64,
    /// Games that failed to construct or run.
    pub(super) failures: u64,
    /// Games stopped by the round cap.
    pub(super) capped: u64,
    /// Total rounds across all games.
    total_rounds: u64,
    /// Fewest rounds in one game.
    min_rounds: Option<u32>,
    /// Most rounds in one game.
    max_rounds: Option<u32>,
}

impl BatchStats {
    /// Add a game outcome to the stats.
    pub(super) fn add_outcome(&mut self, outcome: &PlayOutcome) {
        self.games_played += 1;
        self.total_rounds += u64::from(outcome.rounds);
        if outcome.capped {
            self.capped += 1;
        }
        self.min_rounds = Some(self.min_rounds.map_or(outcome.rounds, |m| m.min(outcome.rounds)));
        self.max_rounds = Some(self.max_rounds.map_or(outcome.rounds, |m| m.max(outcome.rounds)));
    }

    /// Record a game that did not complete.
    pub(super) fn add_failure(&mut self) {
        self.failures += 1;
    }

    /// Merge stats from another accumulator.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.failures += other.failures;
        self.capped += other.capped;
        self.total_rounds += other.total_rounds;
        self.min_rounds = match (self.min_rounds, other.min_rounds) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.max_rounds = match (self.max_rounds, other.max_rounds) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }

    /// Average rounds per game.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn avg_rounds(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_rounds as f64 / self.games_played as f64
    }
}

/// Format batch statistics as human-readable text.
pub(super) fn format_batch_text(stats: &BatchStats) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Batch Results ({} games)", stats.games_played);
    let _ = writeln!(output, "  Average rounds: {:.1}", stats.avg_rounds());
    if let (Some(min), Some(max)) = (stats.min_rounds, stats.max_rounds) {
        let _ = writeln!(output, "  Min/Max rounds: {min}/{max}");
    }
    let _ = writeln!(output, "  Capped: {}", stats.capped);
    if stats.failures > 0 {
        let _ = writeln!(output, "  Failed: {}", stats.failures);
    }

    output
}

/// JSON-serializable batch result.
#[derive(Debug, Serialize)]
pub(super) struct JsonBatchResult {
    /// Base seed; game `i` used `base_seed + i`.
    pub(super) base_seed: u64,
    /// Total games played.
    pub(super) games: u64,
    /// Average rounds per game.
    pub(super) avg_rounds: f64,
    /// Fewest rounds in one game.
    pub(super) min_rounds: Option<u32>,
    /// Most rounds in one game.
    pub(super) max_rounds: Option<u32>,
    /// Games stopped by the round cap.
    pub(super) capped: u64,
    /// Games that failed.
    pub(super) failures: u64,
}

impl JsonBatchResult {
    /// Create from accumulated stats.
    pub(super) fn from_stats(stats: &BatchStats, base_seed: u64) -> Self {
        Self {
            base_seed,
            games: stats.games_played,
            avg_rounds: stats.avg_rounds(),
            min_rounds: stats.min_rounds,
            max_rounds: stats.max_rounds,
            capped: stats.capped,
            failures: stats.failures,
        }
    }
}
