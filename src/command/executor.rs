//! Command execution - the player-driven state machine
//!
//! Every command either applies and returns its events, or is rejected and
//! leaves the state untouched.

use crate::command::outcome::{CommandResult, GameEvent, Rejection};
use crate::command::parser::Command;
use crate::core::config::GameConfig;
use crate::core::types::{Direction, LocationId, Timestamp};
use crate::session::state::GameState;
use crate::world::graph::LocationGraph;

/// Executes player commands against the game state and world graph
pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute one command at wall-clock time `now`
    ///
    /// The caller settles the clock (see `simulation::apply_tick`) before
    /// calling, so time spent before a move is charged to the old location.
    pub fn execute(
        graph: &mut LocationGraph,
        state: &mut GameState,
        config: &GameConfig,
        command: &Command,
        now: Timestamp,
    ) -> CommandResult {
        if !state.active {
            return CommandResult::Rejected(Rejection::GameOver);
        }

        match command {
            Command::Help => CommandResult::Applied(vec![GameEvent::HelpShown]),
            Command::Move(direction) => move_player(graph, state, config, *direction, now),
            Command::Collect => collect_key(graph, state, config),
            Command::Answer(text) => answer_riddle(graph, state, config, text),
            Command::Unknown(token) => {
                CommandResult::Rejected(Rejection::UnknownCommand(token.clone()))
            }
        }
    }
}

fn move_player(
    graph: &LocationGraph,
    state: &mut GameState,
    config: &GameConfig,
    direction: Direction,
    now: Timestamp,
) -> CommandResult {
    let current = graph.get(state.location);

    if let Some(riddle) = current.pending_riddle() {
        return CommandResult::Rejected(Rejection::MustAnswerFirst {
            question: riddle.question.clone(),
        });
    }

    let Some(destination) = current.exit(direction) else {
        return CommandResult::Rejected(Rejection::NoSuchExit(direction));
    };

    if direction == Direction::Treasure && !state.holds_all_keys() {
        return CommandResult::Rejected(Rejection::VaultSealed {
            keys_needed: state.keys_needed(),
        });
    }

    state.location = destination;
    let entered = graph.get(destination);
    if entered.is_timed() {
        state.location_timer = config.location_time_limit;
        state.time_effect_start = Some(now);
    } else {
        state.time_effect_start = None;
    }
    let first_visit = state.visit(destination);
    tracing::info!("Moved {} to {}", direction, destination);

    let mut events = vec![GameEvent::Moved {
        direction,
        to: destination,
        first_visit,
    }];

    if destination == LocationId::TreasureVault {
        state.score += config.win_bonus;
        state.active = false;
        tracing::info!("Vault reached, final score {}", state.score);
        events.push(GameEvent::Won {
            bonus: config.win_bonus,
        });
        return CommandResult::Applied(events);
    }

    if let Some(riddle) = entered.pending_riddle() {
        state.awaiting_answer = true;
        state.current_question = Some(riddle.question.clone());
        events.push(GameEvent::RiddlePosed {
            question: riddle.question.clone(),
        });
    }

    CommandResult::Applied(events)
}

fn collect_key(graph: &LocationGraph, state: &mut GameState, config: &GameConfig) -> CommandResult {
    match graph.get(state.location).key {
        Some(key) if !state.has_key(key) => {
            state.keys.push(key);
            state.score += config.points_per_key;
            tracing::info!("Collected {}", key);
            CommandResult::Applied(vec![GameEvent::KeyCollected {
                key,
                keys_needed: state.keys_needed(),
            }])
        }
        _ => CommandResult::Rejected(Rejection::NothingToCollect),
    }
}

fn answer_riddle(
    graph: &mut LocationGraph,
    state: &mut GameState,
    config: &GameConfig,
    text: &str,
) -> CommandResult {
    if !state.awaiting_answer {
        return CommandResult::Rejected(Rejection::NothingToAnswer);
    }
    let Some(riddle) = graph.get(state.location).pending_riddle() else {
        return CommandResult::Rejected(Rejection::NothingToAnswer);
    };

    let accepted = riddle.accepts(text);
    let question = riddle.question.clone();

    if accepted {
        graph.mark_answered(state.location);
        state.awaiting_answer = false;
        state.current_question = None;
        state.score += config.points_per_riddle;
        tracing::info!("Riddle at {} answered", state.location);
        return CommandResult::Applied(vec![GameEvent::AnswerAccepted {
            points: config.points_per_riddle,
        }]);
    }

    let before = state.health;
    state.health = (before - config.wrong_answer_penalty).max(0);
    tracing::debug!("Wrong answer at {}, health {}", state.location, state.health);
    CommandResult::Applied(vec![GameEvent::AnswerRejected {
        penalty: before - state.health,
        health: state.health,
        question,
    }])
}
