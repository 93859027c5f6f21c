//! Player-facing game state and its persisted shape
//!
//! Field names serialize in camelCase to match the save blob:
//! `{health, keys, location, gameTime, locationTimer, awaitingAnswer,
//! currentQuestion, visitedLocations, active, score, lastTickTimestamp,
//! timeEffectStart}`.

use serde::{Deserialize, Serialize};

use crate::core::config::GameConfig;
use crate::core::error::{ChronosError, Result};
use crate::core::types::{KeyItem, LocationId, Timestamp};

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalCause {
    /// Reached the treasure vault
    Won,
    /// A location countdown hit zero
    TimeExpired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub health: i32,
    pub keys: Vec<KeyItem>,
    pub location: LocationId,
    /// Signed seconds; runs backwards under a reverse effect
    pub game_time: f64,
    /// Countdown in real seconds, only drained outside the hub and vault
    pub location_timer: f64,
    pub awaiting_answer: bool,
    // `deserialize_with` makes the field required even though it is an Option
    #[serde(deserialize_with = "Option::deserialize")]
    pub current_question: Option<String>,
    pub visited_locations: Vec<LocationId>,
    pub active: bool,
    pub score: i64,
    pub last_tick_timestamp: Timestamp,
    #[serde(deserialize_with = "Option::deserialize")]
    pub time_effect_start: Option<Timestamp>,
}

impl GameState {
    /// Fresh state at the hub
    pub fn new(config: &GameConfig, now: Timestamp) -> Self {
        Self {
            health: config.starting_health,
            keys: Vec::new(),
            location: LocationId::CentralHub,
            game_time: 0.0,
            location_timer: config.location_time_limit,
            awaiting_answer: false,
            current_question: None,
            visited_locations: vec![LocationId::CentralHub],
            active: true,
            score: 0,
            last_tick_timestamp: now,
            time_effect_start: None,
        }
    }

    pub fn has_key(&self, key: KeyItem) -> bool {
        self.keys.contains(&key)
    }

    /// Keys still missing for the vault
    pub fn keys_needed(&self) -> usize {
        KeyItem::REQUIRED
            .iter()
            .filter(|k| !self.has_key(**k))
            .count()
    }

    /// Exactly the full key set
    pub fn holds_all_keys(&self) -> bool {
        self.keys.len() == KeyItem::REQUIRED.len() && self.keys_needed() == 0
    }

    /// Record a visit; returns false if already visited
    pub fn visit(&mut self, location: LocationId) -> bool {
        if self.visited_locations.contains(&location) {
            return false;
        }
        self.visited_locations.push(location);
        true
    }

    /// Why the game ended, if it has
    ///
    /// Only the vault ends a game in victory, so the cause follows from
    /// where the player stands once inactive.
    pub fn terminal_cause(&self) -> Option<TerminalCause> {
        if self.active {
            None
        } else if self.location == LocationId::TreasureVault {
            Some(TerminalCause::Won)
        } else {
            Some(TerminalCause::TimeExpired)
        }
    }

    /// Check the invariants a loaded blob must satisfy
    pub fn validate(&self) -> Result<()> {
        let corrupt = |msg: String| Err(ChronosError::CorruptedSave(msg));

        if self.keys.len() > KeyItem::REQUIRED.len() {
            return corrupt(format!("{} keys held, at most 3 allowed", self.keys.len()));
        }
        for (i, key) in self.keys.iter().enumerate() {
            if self.keys[..i].contains(key) {
                return corrupt(format!("{} held twice", key));
            }
        }
        if !self.location_timer.is_finite() || self.location_timer < 0.0 {
            return corrupt(format!("location timer {} out of range", self.location_timer));
        }
        if !self.game_time.is_finite() {
            return corrupt("game time is not a finite number".into());
        }
        if self.awaiting_answer && self.current_question.is_none() {
            return corrupt("awaiting an answer without a question".into());
        }
        if self.awaiting_answer && self.location.is_safe_zone() {
            return corrupt(format!("awaiting an answer at {}", self.location));
        }
        if !self.awaiting_answer && self.current_question.is_some() {
            return corrupt("question kept without awaiting an answer".into());
        }
        if !self.visited_locations.contains(&self.location) {
            return corrupt(format!("current location {} never visited", self.location));
        }

        // Only the vault and an exhausted countdown end a game
        match (self.active, self.location) {
            (true, LocationId::TreasureVault) => {
                return corrupt("still active inside the treasure vault".into());
            }
            (false, LocationId::CentralHub) => {
                return corrupt("game over at the hub".into());
            }
            (false, loc) if !loc.is_safe_zone() && self.location_timer > 0.0 => {
                return corrupt(format!(
                    "game over at {} with {}s still on the countdown",
                    loc, self.location_timer
                ));
            }
            _ => {}
        }
        Ok(())
    }
}
