//! Integration tests for corrupted and legacy saves
//!
//! Any blob that cannot be trusted is discarded and a fresh game starts;
//! loading never fails.

use chronos::core::config::GameConfig;
use chronos::core::types::LocationId;
use chronos::persistence::{self, JsonFileStore, MemoryStore, SaveBlob, StateStore};
use chronos::session::Session;
use serde_json::{json, Value};

const NOW: u64 = 1_700_000_000_000;

fn valid_blob() -> Value {
    let session = Session::new(GameConfig::default(), 5, NOW - 1_000);
    serde_json::to_value(SaveBlob::capture(&session)).expect("blob serializes")
}

fn resume_raw(raw: &str) -> Session {
    let store = MemoryStore::with_raw(raw);
    persistence::resume(&store, GameConfig::default(), 5, NOW)
}

fn assert_fresh(session: &Session) {
    let state = session.state();
    assert!(state.active);
    assert_eq!(state.location, LocationId::CentralHub);
    assert_eq!(state.game_time, 0.0);
    assert_eq!(state.last_tick_timestamp, NOW);
}

// ============================================================================
// Corrupted blobs
// ============================================================================

#[test]
fn test_unparseable_blob_starts_fresh() {
    assert_fresh(&resume_raw("{ definitely not json"));
    assert_fresh(&resume_raw(""));
}

#[test]
fn test_missing_field_starts_fresh() {
    for field in ["health", "currentQuestion", "timeEffectStart", "visitedLocations"] {
        let mut blob = valid_blob();
        blob.as_object_mut().expect("object").remove(field);
        assert_fresh(&resume_raw(&blob.to_string()));
    }
}

#[test]
fn test_unknown_names_start_fresh() {
    let mut blob = valid_blob();
    blob["location"] = json!("Atlantis");
    assert_fresh(&resume_raw(&blob.to_string()));

    let mut blob = valid_blob();
    blob["keys"] = json!(["Moon Key"]);
    assert_fresh(&resume_raw(&blob.to_string()));
}

#[test]
fn test_broken_invariants_start_fresh() {
    let mut duplicate_keys = valid_blob();
    duplicate_keys["keys"] = json!(["Stone Key", "Stone Key"]);

    let mut negative_timer = valid_blob();
    negative_timer["locationTimer"] = json!(-3.0);

    let mut question_missing = valid_blob();
    question_missing["awaitingAnswer"] = json!(true);

    let mut unvisited = valid_blob();
    unvisited["visitedLocations"] = json!([]);

    let mut stray_question = valid_blob();
    stray_question["currentQuestion"] = json!("anything");

    let mut active_in_vault = valid_blob();
    active_in_vault["location"] = json!("Treasure Vault");
    active_in_vault["visitedLocations"] = json!(["Central Hub", "Treasure Vault"]);

    let mut over_at_hub = valid_blob();
    over_at_hub["active"] = json!(false);

    let mut over_with_time_left = valid_blob();
    over_with_time_left["location"] = json!("Stonehenge");
    over_with_time_left["visitedLocations"] = json!(["Central Hub", "Stonehenge"]);
    over_with_time_left["active"] = json!(false);
    over_with_time_left["locationTimer"] = json!(50.0);

    let mut wrong_question = valid_blob();
    wrong_question["location"] = json!("Stonehenge");
    wrong_question["visitedLocations"] = json!(["Central Hub", "Stonehenge"]);
    wrong_question["awaitingAnswer"] = json!(true);
    wrong_question["currentQuestion"] = json!("What is 2+2?");

    for blob in [
        duplicate_keys,
        negative_timer,
        question_missing,
        unvisited,
        stray_question,
        active_in_vault,
        over_at_hub,
        over_with_time_left,
        wrong_question,
    ] {
        assert_fresh(&resume_raw(&blob.to_string()));
    }
}

/// The same question text as the map's riddle is accepted
#[test]
fn test_matching_question_is_kept() {
    let mut blob = valid_blob();
    blob["location"] = json!("Stonehenge");
    blob["visitedLocations"] = json!(["Central Hub", "Stonehenge"]);
    blob["awaitingAnswer"] = json!(true);
    blob["currentQuestion"] = json!("How many stones form the main circle of Stonehenge?");

    let session = resume_raw(&blob.to_string());

    assert_eq!(session.state().location, LocationId::Stonehenge);
    assert!(session.state().awaiting_answer);
}

#[test]
fn test_bad_world_layout_starts_fresh() {
    let mut blob = valid_blob();
    let first = blob["world"]["portals"][0]["location"].clone();
    blob["world"]["portals"][1]["location"] = first;
    assert_fresh(&resume_raw(&blob.to_string()));

    let mut blob = valid_blob();
    blob["world"]["answered"] = json!(["Central Hub"]);
    assert_fresh(&resume_raw(&blob.to_string()));
}

// ============================================================================
// Valid saves
// ============================================================================

#[test]
fn test_blob_without_world_is_accepted() {
    let mut blob = valid_blob();
    blob["score"] = json!(1000);
    blob["keys"] = json!(["Forest Key"]);
    blob.as_object_mut().expect("object").remove("world");

    let session = resume_raw(&blob.to_string());

    assert_eq!(session.state().score, 1000);
    assert_eq!(session.state().keys.len(), 1);
    // One second away at the hub
    assert_eq!(session.state().game_time, 1.0);
}

#[test]
fn test_empty_store_starts_fresh() {
    let store = MemoryStore::new();
    assert!(store.load().expect("empty store loads").is_none());
    assert_fresh(&persistence::resume(&store, GameConfig::default(), 5, NOW));
}

#[test]
fn test_garbage_save_file_starts_fresh() {
    let dir = std::env::temp_dir().join(format!("chronos-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("save.json");
    std::fs::write(&path, "[1, 2, 3]").expect("write garbage");

    let mut store = JsonFileStore::new(&path);
    let session = persistence::resume(&store, GameConfig::default(), 5, NOW);
    assert_fresh(&session);

    // The fresh game overwrites the garbage
    persistence::persist(&mut store, &session).expect("save succeeds");
    assert!(store.load().expect("save parses").is_some());
}
