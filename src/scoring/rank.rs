//! Rank tiers awarded at the end of a game

use std::fmt;

use serde::Serialize;

use crate::core::config::GameConfig;
use crate::core::types::KeyItem;

/// Five ordered tiers, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Rank {
    TimeStudent,
    TimeNovice,
    TimeSeeker,
    TimeCollector,
    MasterOfTime,
}

impl Rank {
    /// Step function over final score and keys held
    ///
    /// Any score reaching the win bonus is a perfect completion.
    pub fn from_result(score: i64, keys: usize, config: &GameConfig) -> Self {
        if score >= config.win_bonus {
            Self::MasterOfTime
        } else if keys >= KeyItem::REQUIRED.len() {
            Self::TimeCollector
        } else if keys >= 2 {
            Self::TimeSeeker
        } else if keys >= 1 {
            Self::TimeNovice
        } else {
            Self::TimeStudent
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::MasterOfTime => "MASTER OF TIME! Perfect completion!",
            Self::TimeCollector => "TIME COLLECTOR! All keys found!",
            Self::TimeSeeker => "TIME SEEKER! Good progress!",
            Self::TimeNovice => "TIME NOVICE! Keep exploring!",
            Self::TimeStudent => "TIME STUDENT! Practice makes perfect!",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
