//! End-of-game statistics, score breakdown and rank
//!
//! Pure functions over the final state; computed once when a game ends,
//! whichever way it ended.

pub mod rank;

pub use rank::Rank;

use serde::Serialize;

use crate::core::config::GameConfig;
use crate::core::types::{KeyItem, LocationId};
use crate::session::state::{GameState, TerminalCause};
use crate::world::graph::LocationGraph;

/// Points earned per source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub keys: usize,
    pub key_points: i64,
    pub riddles: usize,
    pub riddle_points: i64,
    pub win_bonus: i64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i64 {
        self.key_points + self.riddle_points + self.win_bonus
    }
}

/// Statistics shown when a game ends
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalReport {
    pub cause: TerminalCause,
    /// Signed game seconds at the end
    pub total_game_time: f64,
    pub final_health: i32,
    pub keys: Vec<KeyItem>,
    pub visited: Vec<LocationId>,
    /// Percentage of keys collected, 0-100
    pub completion_rate: f64,
    pub breakdown: ScoreBreakdown,
    pub score: i64,
    pub rank: Rank,
}

/// Share of the required keys held, as a percentage
pub fn completion_rate(keys_held: usize) -> f64 {
    keys_held as f64 / KeyItem::REQUIRED.len() as f64 * 100.0
}

pub fn score_breakdown(
    state: &GameState,
    graph: &LocationGraph,
    config: &GameConfig,
    cause: TerminalCause,
) -> ScoreBreakdown {
    let keys = state.keys.len();
    let riddles = graph.riddles_answered();
    ScoreBreakdown {
        keys,
        key_points: keys as i64 * config.points_per_key,
        riddles,
        riddle_points: riddles as i64 * config.points_per_riddle,
        win_bonus: match cause {
            TerminalCause::Won => config.win_bonus,
            TerminalCause::TimeExpired => 0,
        },
    }
}

impl FinalReport {
    /// Build the report for a finished game; `None` while still active
    pub fn compute(state: &GameState, graph: &LocationGraph, config: &GameConfig) -> Option<Self> {
        let cause = state.terminal_cause()?;
        let breakdown = score_breakdown(state, graph, config, cause);
        Some(Self {
            cause,
            total_game_time: state.game_time,
            final_health: state.health,
            keys: state.keys.clone(),
            visited: state.visited_locations.clone(),
            completion_rate: completion_rate(state.keys.len()),
            breakdown,
            score: state.score,
            rank: Rank::from_result(state.score, state.keys.len(), config),
        })
    }
}
