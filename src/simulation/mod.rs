//! Time simulation: the pure engine and the tick path built on it

pub mod tick;
pub mod time_engine;

pub use tick::{apply_tick, TickOutcome};
pub use time_engine::{advance, TimeDelta};
