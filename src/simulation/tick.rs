//! Clock-driven state transitions
//!
//! `apply_tick` is the only place wall-clock time enters the game. The live
//! ticker and resume reconciliation both call it, so a paused-and-resumed game
//! and a continuously running one advance identically.

use crate::core::config::GameConfig;
use crate::core::types::{seconds_between, Timestamp};
use crate::session::state::GameState;
use crate::simulation::time_engine::{advance, TimeDelta};
use crate::world::graph::LocationGraph;

/// What a tick did to the state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Game already over; nothing changed
    Inactive,
    /// Clocks moved forward
    Advanced(TimeDelta),
    /// The location countdown ran out; the game is now over
    Expired,
}

/// Advance `state` to `now`
pub fn apply_tick(
    state: &mut GameState,
    graph: &LocationGraph,
    config: &GameConfig,
    now: Timestamp,
) -> TickOutcome {
    if !state.active {
        return TickOutcome::Inactive;
    }

    let wall = seconds_between(state.last_tick_timestamp, now);
    let location = graph.get(state.location);
    let delta = advance(location, wall, config.max_catch_up_seconds);
    state.last_tick_timestamp = now;

    if location.is_timed() && delta.location_timer >= state.location_timer {
        // Game time only accrues up to the moment the countdown hit zero
        let until_expiry = advance(location, state.location_timer, config.max_catch_up_seconds);
        state.game_time += until_expiry.game_time;
        state.location_timer = 0.0;
        state.active = false;
        tracing::info!(
            "Countdown expired at {} (game time {:.1}s)",
            state.location,
            state.game_time
        );
        return TickOutcome::Expired;
    }

    state.game_time += delta.game_time;
    state.location_timer -= delta.location_timer;
    tracing::debug!(
        "Tick: wall {:.3}s, game {:+.3}s, timer {:.1}s left",
        wall,
        delta.game_time,
        state.location_timer
    );
    TickOutcome::Advanced(delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::LocationId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup(location: LocationId) -> (GameState, LocationGraph, GameConfig) {
        let config = GameConfig::default();
        let graph = LocationGraph::generate(&config, &mut ChaCha8Rng::seed_from_u64(42));
        let mut state = GameState::new(&config, 0);
        state.location = location;
        state.visit(location);
        (state, graph, config)
    }

    #[test]
    fn test_hub_tick_keeps_timer() {
        let (mut state, graph, config) = setup(LocationId::CentralHub);
        state.location_timer = 50.0;
        let outcome = apply_tick(&mut state, &graph, &config, 2_000);
        assert!(matches!(outcome, TickOutcome::Advanced(_)));
        assert_eq!(state.game_time, 2.0);
        assert_eq!(state.location_timer, 50.0);
        assert_eq!(state.last_tick_timestamp, 2_000);
    }

    #[test]
    fn test_reverse_tick_goes_negative() {
        let (mut state, graph, config) = setup(LocationId::CrookedForest);
        apply_tick(&mut state, &graph, &config, 4_000);
        assert_eq!(state.game_time, -4.0);
        assert_eq!(state.location_timer, 116.0);
    }

    #[test]
    fn test_expiry_clamps_to_zero() {
        let (mut state, graph, config) = setup(LocationId::BermudaTriangle);
        state.location_timer = 3.0;
        let outcome = apply_tick(&mut state, &graph, &config, 5_000);
        assert_eq!(outcome, TickOutcome::Expired);
        assert_eq!(state.location_timer, 0.0);
        assert!(!state.active);
        // Only the 3 seconds before expiry count, at 1.5x
        assert_eq!(state.game_time, 4.5);
    }

    #[test]
    fn test_exact_expiry() {
        let (mut state, graph, config) = setup(LocationId::Stonehenge);
        state.location_timer = 2.0;
        assert_eq!(
            apply_tick(&mut state, &graph, &config, 2_000),
            TickOutcome::Expired
        );
        assert_eq!(state.location_timer, 0.0);
    }

    #[test]
    fn test_inactive_is_noop() {
        let (mut state, graph, config) = setup(LocationId::Stonehenge);
        state.active = false;
        let before = state.clone();
        assert_eq!(
            apply_tick(&mut state, &graph, &config, 9_000),
            TickOutcome::Inactive
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_gap_is_capped() {
        let (mut state, graph, config) = setup(LocationId::CentralHub);
        apply_tick(&mut state, &graph, &config, 3_600_000);
        assert_eq!(state.game_time, 10.0);
        assert_eq!(state.last_tick_timestamp, 3_600_000);
    }

    #[test]
    fn test_backwards_clock_does_nothing() {
        let (mut state, graph, config) = setup(LocationId::Stonehenge);
        state.last_tick_timestamp = 10_000;
        apply_tick(&mut state, &graph, &config, 5_000);
        assert_eq!(state.game_time, 0.0);
        assert_eq!(state.location_timer, 120.0);
    }
}
