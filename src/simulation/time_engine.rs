//! Time engine - wall-clock seconds to game seconds
//!
//! Pure conversion used by live ticks and by resume reconciliation alike.

use crate::world::location::{Location, TimeEffect};

/// Result of converting one wall-clock interval
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeDelta {
    /// Change to apply to the game clock (may be negative)
    pub game_time: f64,
    /// Seconds to drain from the location countdown
    pub location_timer: f64,
}

/// Clamp a raw wall delta into `[0, max_delta]`
pub fn clamp_wall_delta(wall_delta: f64, max_delta: f64) -> f64 {
    if wall_delta.is_nan() {
        return 0.0;
    }
    wall_delta.clamp(0.0, max_delta)
}

/// Game-time change for `wall_delta` seconds spent under `effect`
pub fn game_time_delta(effect: TimeEffect, wall_delta: f64) -> f64 {
    match effect {
        TimeEffect::Normal => wall_delta,
        TimeEffect::Accelerated { factor } | TimeEffect::Decelerated { factor } => {
            wall_delta * factor
        }
        TimeEffect::Reverse => -wall_delta,
    }
}

/// Convert a wall-clock interval spent at `location`
///
/// The hub and the vault pass time normally and never drain the countdown.
pub fn advance(location: &Location, wall_delta: f64, max_delta: f64) -> TimeDelta {
    let wall = clamp_wall_delta(wall_delta, max_delta);

    if !location.is_timed() {
        return TimeDelta {
            game_time: wall,
            location_timer: 0.0,
        };
    }

    TimeDelta {
        game_time: game_time_delta(location.time_effect, wall),
        location_timer: wall,
    }
}
