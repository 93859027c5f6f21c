//! Command pipeline
//!
//! Raw input -> parse_command -> Command -> CommandExecutor -> CommandResult

pub mod executor;
pub mod outcome;
pub mod parser;

pub use executor::CommandExecutor;
pub use outcome::{CommandResult, GameEvent, Rejection};
pub use parser::{parse_command, Command};
