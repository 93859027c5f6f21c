//! Integration tests for save and resume
//!
//! A resumed game is advanced by one tick covering the time it was away,
//! capped like any live tick. These tests compare resumed sessions with
//! sessions that kept ticking.

use chronos::command::Rejection;
use chronos::core::config::GameConfig;
use chronos::core::types::{Direction, LocationId};
use chronos::persistence::{self, MemoryStore, StateStore};
use chronos::session::{Session, TerminalCause};

const SEED: u64 = 77;

fn portal_to(session: &Session, target: LocationId) -> Direction {
    let hub = session.graph().get(LocationId::CentralHub);
    Direction::PORTALS
        .into_iter()
        .find(|d| hub.exit(*d) == Some(target))
        .expect("every special location has a hub portal")
}

/// Session standing in `target` since t = 0, riddle posed
fn standing_in(target: LocationId) -> Session {
    let mut session = Session::new(GameConfig::default(), SEED, 0);
    let dir = portal_to(&session, target);
    session.submit(dir.name(), 0);
    session
}

fn saved(session: &Session) -> MemoryStore {
    let mut store = MemoryStore::new();
    persistence::persist(&mut store, session).expect("memory store never fails");
    store
}

// ============================================================================
// Reconciliation
// ============================================================================

/// Resuming after a short gap matches live ticking in one-second steps
#[test]
fn test_resume_matches_live_ticking() {
    for target in LocationId::SPECIAL {
        for gap in 1..=10u64 {
            let mut live = standing_in(target);
            for second in 1..=gap {
                live.tick(second * 1_000);
            }

            let store = saved(&standing_in(target));
            let resumed = persistence::resume(&store, GameConfig::default(), SEED, gap * 1_000);

            assert_eq!(
                resumed.state().game_time,
                live.state().game_time,
                "{} after {}s",
                target,
                gap
            );
            assert_eq!(resumed.state().location_timer, live.state().location_timer);
            assert_eq!(resumed.state().last_tick_timestamp, gap * 1_000);
        }
    }
}

/// A long absence only counts for the catch-up cap
#[test]
fn test_long_gap_is_capped() {
    let store = saved(&standing_in(LocationId::BermudaTriangle));

    let resumed = persistence::resume(&store, GameConfig::default(), SEED, 3_600_000);

    assert_eq!(resumed.state().location_timer, 110.0);
    assert_eq!(resumed.state().game_time, 15.0);
    assert!(resumed.is_active());
}

/// Clock moved backwards between save and resume: nothing happens
#[test]
fn test_resume_with_earlier_clock() {
    let mut session = standing_in(LocationId::Stonehenge);
    session.tick(50_000);
    let store = saved(&session);

    let resumed = persistence::resume(&store, GameConfig::default(), SEED, 40_000);

    assert_eq!(resumed.state().location_timer, session.state().location_timer);
    assert_eq!(resumed.state().game_time, session.state().game_time);
}

/// The reconciliation tick can end the game
#[test]
fn test_resume_can_expire() {
    let mut session = standing_in(LocationId::Stonehenge);
    for step in 1..=23u64 {
        session.tick(step * 5_000);
    }
    assert_eq!(session.state().location_timer, 5.0);
    let store = saved(&session);

    let resumed = persistence::resume(&store, GameConfig::default(), SEED, 115_000 + 8_000);

    for second in 1..=8u64 {
        session.tick(115_000 + second * 1_000);
    }
    assert!(!session.is_active());
    // The full 120s countdown at half speed
    assert_eq!(resumed.state().game_time, 60.0);
    assert_eq!(resumed.state().game_time, session.state().game_time);

    assert!(!resumed.is_active());
    assert_eq!(resumed.state().location_timer, 0.0);
    assert_eq!(
        resumed.report().map(|r| r.cause),
        Some(TerminalCause::TimeExpired)
    );
}

// ============================================================================
// World preservation
// ============================================================================

/// Portal layout and open question survive a save
#[test]
fn test_resume_keeps_world_and_question() {
    let session = standing_in(LocationId::CrookedForest);
    let store = saved(&session);

    let mut resumed = persistence::resume(&store, GameConfig::default(), SEED + 1, 1_000);

    assert_eq!(resumed.graph().layout(), session.graph().layout());
    assert!(resumed.state().awaiting_answer);
    let back = portal_to(&resumed, LocationId::CrookedForest)
        .inverse()
        .expect("portals have a way back");
    assert!(matches!(
        resumed.submit(back.name(), 2_000).rejection(),
        Some(Rejection::MustAnswerFirst { .. })
    ));
}

/// Answered riddles stay answered after a resume
#[test]
fn test_resume_keeps_answered_riddles() {
    let mut session = standing_in(LocationId::BermudaTriangle);
    session.submit("answer disappearances", 1_000);
    let back = portal_to(&session, LocationId::BermudaTriangle)
        .inverse()
        .expect("portals have a way back");
    session.submit(back.name(), 2_000);
    let store = saved(&session);

    let mut resumed = persistence::resume(&store, GameConfig::default(), SEED, 3_000);
    assert_eq!(resumed.graph().riddles_answered(), 1);

    let dir = portal_to(&resumed, LocationId::BermudaTriangle);
    resumed.submit(dir.name(), 4_000);
    assert!(!resumed.state().awaiting_answer);
}

/// A finished game resumes finished, with its report
#[test]
fn test_resume_finished_game() {
    let mut session = standing_in(LocationId::Stonehenge);
    for step in 1..=12u64 {
        session.tick(step * 10_000);
    }
    assert!(!session.is_active());
    let store = saved(&session);

    let resumed = persistence::resume(&store, GameConfig::default(), SEED, 500_000);

    assert!(!resumed.is_active());
    assert_eq!(resumed.report(), session.report());
    assert!(store.load().expect("blob parses").is_some());
}
