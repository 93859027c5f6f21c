//! What a command did: applied events or a rejection

use thiserror::Error;

use crate::core::types::{Direction, KeyItem, LocationId};

/// A state change (or informational response) caused by a command
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    HelpShown,
    Moved {
        direction: Direction,
        to: LocationId,
        first_visit: bool,
    },
    /// Arrival at a location whose riddle is still open
    RiddlePosed { question: String },
    KeyCollected { key: KeyItem, keys_needed: usize },
    AnswerAccepted { points: i64 },
    AnswerRejected {
        /// Health actually lost, after the floor at zero
        penalty: i32,
        health: i32,
        question: String,
    },
    Won { bonus: i64 },
}

/// Why a command changed nothing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("The game is over. Reset to play again.")]
    GameOver,

    #[error("Unknown command '{0}'. Type 'help' for a list of commands.")]
    UnknownCommand(String),

    #[error("You can't go {0} from here.")]
    NoSuchExit(Direction),

    #[error("The treasure vault is sealed! You need {keys_needed} more keys.")]
    VaultSealed { keys_needed: usize },

    #[error("You must answer the question before leaving: {question}")]
    MustAnswerFirst { question: String },

    #[error("There's no key to collect here or you already have it.")]
    NothingToCollect,

    #[error("There's no question to answer right now.")]
    NothingToAnswer,
}

/// Result of submitting a command
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Applied(Vec<GameEvent>),
    Rejected(Rejection),
}

impl CommandResult {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn events(&self) -> &[GameEvent] {
        match self {
            Self::Applied(events) => events,
            Self::Rejected(_) => &[],
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(reason) => Some(reason),
            Self::Applied(_) => None,
        }
    }
}
