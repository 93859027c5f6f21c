//! Persistence - one opaque JSON blob per game
//!
//! The blob is the camelCase `GameState` with an optional `world` field
//! carrying the portal layout. Loading never fails the caller: a blob that
//! cannot be trusted is logged and replaced by a fresh game.

pub mod file;
pub mod memory;
pub mod remote;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use remote::RemoteStore;

use serde::{Deserialize, Serialize};

use crate::core::config::GameConfig;
use crate::core::error::{ChronosError, Result};
use crate::core::types::Timestamp;
use crate::session::{GameState, Session};
use crate::world::graph::{LocationGraph, WorldLayout};

/// Everything saved for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveBlob {
    #[serde(flatten)]
    pub state: GameState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world: Option<WorldLayout>,
}

impl SaveBlob {
    pub fn capture(session: &Session) -> Self {
        Self {
            state: session.state().clone(),
            world: Some(session.graph().layout()),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a blob; any shape problem is a corrupted save
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| ChronosError::CorruptedSave(e.to_string()))
    }
}

/// Load/save of a single blob
pub trait StateStore {
    /// `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<SaveBlob>>;
    fn save(&mut self, blob: &SaveBlob) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

/// Save the session's current state
pub fn persist(store: &mut dyn StateStore, session: &Session) -> Result<()> {
    store.save(&SaveBlob::capture(session))
}

/// Load the saved game, or start a fresh one
///
/// A loaded game is reconciled with one tick covering the time since its
/// last tick, capped like any live tick.
pub fn resume(store: &dyn StateStore, config: GameConfig, seed: u64, now: Timestamp) -> Session {
    let loaded = store
        .load()
        .and_then(|blob| blob.map(|b| restore(&config, b, seed)).transpose());

    match loaded {
        Ok(Some(mut session)) => {
            let outcome = session.tick(now);
            tracing::info!(
                "Resumed game at {} ({:?})",
                session.state().location,
                outcome
            );
            session
        }
        Ok(None) => Session::new(config, seed, now),
        Err(e) => {
            tracing::warn!("Discarding saved game: {}", e);
            Session::new(config, seed, now)
        }
    }
}

/// Validate a blob and rebuild its session without advancing time
pub fn restore(config: &GameConfig, blob: SaveBlob, seed: u64) -> Result<Session> {
    let SaveBlob { state, world } = blob;
    state.validate()?;

    let graph = match world {
        Some(layout) => LocationGraph::from_layout(config, &layout)?,
        None => legacy_graph(config, &state, seed),
    };

    let here = graph.get(state.location);
    match (state.awaiting_answer, here.pending_riddle()) {
        (true, None) => {
            return Err(ChronosError::CorruptedSave(format!(
                "awaiting an answer at {} with no open riddle",
                state.location
            )))
        }
        (true, Some(riddle))
            if state.current_question.as_deref() != Some(riddle.question.as_str()) =>
        {
            return Err(ChronosError::CorruptedSave(format!(
                "posed question does not match the riddle at {}",
                state.location
            )))
        }
        (false, Some(_)) if state.active => {
            return Err(ChronosError::CorruptedSave(format!(
                "riddle at {} is open but not posed",
                state.location
            )))
        }
        _ => {}
    }

    Ok(Session::from_parts(config.clone(), graph, state, seed))
}

/// Blobs without a layout get a freshly generated map
///
/// Standing at a riddle location with no question pending means that riddle
/// was already answered.
fn legacy_graph(config: &GameConfig, state: &GameState, seed: u64) -> LocationGraph {
    use rand::SeedableRng;

    tracing::debug!("Save has no world layout, regenerating");
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
    let mut graph = LocationGraph::generate(config, &mut rng);
    if !state.awaiting_answer {
        graph.mark_answered(state.location);
    }
    graph
}
