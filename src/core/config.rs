//! Game configuration with documented constants
//!
//! Every tunable number lives here. Defaults give the standard game;
//! a TOML file may override any subset of them.

use std::path::Path;

use serde::Deserialize;

use crate::core::error::{ChronosError, Result};

/// Configuration for a game session
///
/// Passed explicitly to the session, the interpreter and the tick path.
/// There is no global instance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === TIME ===
    /// Countdown granted on every entry into a timed location (seconds)
    ///
    /// Only Bermuda Triangle, Stonehenge and Crooked Forest are timed.
    /// The hub and the vault never drain the countdown.
    pub location_time_limit: f64,

    /// Largest wall-clock gap converted by a single tick (seconds)
    ///
    /// Bounds the damage of a suspended process or a long pause between
    /// save and resume. Applies identically to live ticks and to resume.
    pub max_catch_up_seconds: f64,

    /// Period of the live ticker (milliseconds)
    pub tick_period_ms: u64,

    /// Game-time multiplier inside accelerated locations (must be > 1)
    ///
    /// At 1.5, three minutes of game time pass during two real minutes.
    pub accelerated_factor: f64,

    /// Game-time multiplier inside decelerated locations (0 < x < 1)
    ///
    /// At 0.5, one minute of game time passes during two real minutes.
    pub decelerated_factor: f64,

    /// Shuffle time effects among the three special locations at generation
    pub randomize_time_effects: bool,

    // === PLAYER ===
    /// Health at the start of a game
    pub starting_health: i32,

    /// Health lost for every wrong answer
    pub wrong_answer_penalty: i32,

    // === SCORING ===
    /// Points for collecting one key
    pub points_per_key: i64,

    /// Points for answering one riddle
    pub points_per_riddle: i64,

    /// Points for reaching the treasure vault
    pub win_bonus: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            location_time_limit: 120.0,
            max_catch_up_seconds: 10.0,
            tick_period_ms: 1000,
            accelerated_factor: 1.5,
            decelerated_factor: 0.5,
            randomize_time_effects: false,

            starting_health: 100,
            wrong_answer_penalty: 10,

            points_per_key: 1000,
            points_per_riddle: 500,
            win_bonus: 10_000,
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.location_time_limit > 0.0) {
            return Err(ChronosError::InvalidConfig(format!(
                "location_time_limit ({}) must be positive",
                self.location_time_limit
            )));
        }

        if !(self.max_catch_up_seconds > 0.0) {
            return Err(ChronosError::InvalidConfig(format!(
                "max_catch_up_seconds ({}) must be positive",
                self.max_catch_up_seconds
            )));
        }

        if self.tick_period_ms == 0 {
            return Err(ChronosError::InvalidConfig(
                "tick_period_ms must be non-zero".into(),
            ));
        }

        if !(self.accelerated_factor > 1.0) {
            return Err(ChronosError::InvalidConfig(format!(
                "accelerated_factor ({}) should be > 1",
                self.accelerated_factor
            )));
        }

        if !(self.decelerated_factor > 0.0 && self.decelerated_factor < 1.0) {
            return Err(ChronosError::InvalidConfig(format!(
                "decelerated_factor ({}) should be between 0 and 1",
                self.decelerated_factor
            )));
        }

        if self.starting_health <= 0 || self.wrong_answer_penalty < 0 {
            return Err(ChronosError::InvalidConfig(
                "starting_health must be positive and wrong_answer_penalty non-negative".into(),
            ));
        }

        Ok(())
    }
}
