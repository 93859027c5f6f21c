//! Location - a node in the world graph
//!
//! Each location carries its exits, an optional key, an optional riddle
//! and the time distortion that applies while the player stands in it.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{Direction, KeyItem, LocationId};

/// How game time accrues relative to wall-clock time at a location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TimeEffect {
    Normal,
    /// Game time runs faster than real time (factor > 1)
    Accelerated { factor: f64 },
    /// Game time runs slower than real time (0 < factor < 1)
    Decelerated { factor: f64 },
    /// Game time runs backwards at real-time speed
    Reverse,
}

impl TimeEffect {
    /// Numeric modifier shown to the player
    ///
    /// Reverse reports -1; its magnitude is never used for accrual.
    pub fn modifier(&self) -> f64 {
        match self {
            Self::Normal => 1.0,
            Self::Accelerated { factor } | Self::Decelerated { factor } => *factor,
            Self::Reverse => -1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Accelerated { .. } => "ACCELERATED",
            Self::Decelerated { .. } => "DECELERATED",
            Self::Reverse => "REVERSE",
        }
    }
}

impl Default for TimeEffect {
    fn default() -> Self {
        Self::Normal
    }
}

/// A question that must be answered before leaving its location
#[derive(Debug, Clone, PartialEq)]
pub struct Riddle {
    pub question: String,
    pub answer: String,
    pub answered: bool,
}

impl Riddle {
    pub fn new(question: &str, answer: &str) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            answered: false,
        }
    }

    /// Case-insensitive containment: "It was the DISAPPEARANCES" matches "disappearances"
    pub fn accepts(&self, submitted: &str) -> bool {
        let submitted = submitted.trim();
        if submitted.is_empty() {
            return false;
        }
        submitted
            .to_lowercase()
            .contains(&self.answer.to_lowercase())
    }
}

/// A location in the world graph
#[derive(Debug, Clone)]
pub struct Location {
    pub id: LocationId,
    pub description: String,
    /// Line shown when the player arrives
    pub welcome: String,
    pub key: Option<KeyItem>,
    pub exits: AHashMap<Direction, LocationId>,
    pub time_effect: TimeEffect,
    pub riddle: Option<Riddle>,
}

impl Location {
    pub fn new(id: LocationId, description: &str, welcome: &str) -> Self {
        Self {
            id,
            description: description.to_string(),
            welcome: welcome.to_string(),
            key: None,
            exits: AHashMap::new(),
            time_effect: TimeEffect::Normal,
            riddle: None,
        }
    }

    pub fn with_key(mut self, key: KeyItem) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_effect(mut self, effect: TimeEffect) -> Self {
        self.time_effect = effect;
        self
    }

    pub fn with_riddle(mut self, question: &str, answer: &str) -> Self {
        self.riddle = Some(Riddle::new(question, answer));
        self
    }

    /// Countdown and distortion apply here
    pub fn is_timed(&self) -> bool {
        !self.id.is_safe_zone()
    }

    pub fn exit(&self, direction: Direction) -> Option<LocationId> {
        self.exits.get(&direction).copied()
    }

    /// Exits in a stable order for display
    pub fn exit_directions(&self) -> Vec<Direction> {
        let order = [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::Treasure,
        ];
        order
            .into_iter()
            .filter(|d| self.exits.contains_key(d))
            .collect()
    }

    /// Question still waiting for a correct answer
    pub fn pending_riddle(&self) -> Option<&Riddle> {
        self.riddle.as_ref().filter(|r| !r.answered)
    }
}
