//! Core type definitions used throughout the codebase

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Wall-clock instant in milliseconds since the Unix epoch
pub type Timestamp = u64;

/// Current wall-clock time
pub fn now_millis() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as Timestamp)
        .unwrap_or(0)
}

/// Seconds elapsed between two timestamps (zero if the clock went backwards)
pub fn seconds_between(earlier: Timestamp, later: Timestamp) -> f64 {
    later.saturating_sub(earlier) as f64 / 1000.0
}

/// Identity of a location in the world graph
///
/// Serialized as the display name so save files stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LocationId {
    #[serde(rename = "Central Hub")]
    CentralHub,
    #[serde(rename = "Bermuda Triangle")]
    BermudaTriangle,
    #[serde(rename = "Stonehenge")]
    Stonehenge,
    #[serde(rename = "Crooked Forest")]
    CrookedForest,
    #[serde(rename = "Treasure Vault")]
    TreasureVault,
}

impl LocationId {
    pub const ALL: [LocationId; 5] = [
        LocationId::CentralHub,
        LocationId::BermudaTriangle,
        LocationId::Stonehenge,
        LocationId::CrookedForest,
        LocationId::TreasureVault,
    ];

    /// The three timed locations reachable through the hub's portals
    pub const SPECIAL: [LocationId; 3] = [
        LocationId::BermudaTriangle,
        LocationId::Stonehenge,
        LocationId::CrookedForest,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::CentralHub => "Central Hub",
            Self::BermudaTriangle => "Bermuda Triangle",
            Self::Stonehenge => "Stonehenge",
            Self::CrookedForest => "Crooked Forest",
            Self::TreasureVault => "Treasure Vault",
        }
    }

    /// Hub and vault: no countdown, no distortion
    pub fn is_safe_zone(&self) -> bool {
        matches!(self, Self::CentralHub | Self::TreasureVault)
    }

    /// Position in `LocationId::ALL`
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Exit names a player can type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Treasure,
}

impl Direction {
    /// Hub directions that receive a special location
    pub const PORTALS: [Direction; 3] = [Direction::North, Direction::South, Direction::East];

    /// Direction of the exit leading back (`None` for the one-way treasure exit)
    pub fn inverse(&self) -> Option<Direction> {
        match self {
            Self::North => Some(Self::South),
            Self::South => Some(Self::North),
            Self::East => Some(Self::West),
            Self::West => Some(Self::East),
            Self::Treasure => None,
        }
    }

    pub fn parse(token: &str) -> Option<Direction> {
        match token {
            "north" => Some(Self::North),
            "south" => Some(Self::South),
            "east" => Some(Self::East),
            "west" => Some(Self::West),
            "treasure" => Some(Self::Treasure),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::Treasure => "treasure",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Collectible needed to open the treasure vault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyItem {
    #[serde(rename = "Triangle Key")]
    Triangle,
    #[serde(rename = "Stone Key")]
    Stone,
    #[serde(rename = "Forest Key")]
    Forest,
}

impl KeyItem {
    /// Every key; holding exactly these opens the vault
    pub const REQUIRED: [KeyItem; 3] = [KeyItem::Triangle, KeyItem::Stone, KeyItem::Forest];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Triangle => "Triangle Key",
            Self::Stone => "Stone Key",
            Self::Forest => "Forest Key",
        }
    }
}

impl fmt::Display for KeyItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_serializes_as_name() {
        let json = serde_json::to_string(&LocationId::CrookedForest).unwrap();
        assert_eq!(json, "\"Crooked Forest\"");
        let back: LocationId = serde_json::from_str("\"Central Hub\"").unwrap();
        assert_eq!(back, LocationId::CentralHub);
    }

    #[test]
    fn test_unknown_location_fails() {
        let result: Result<LocationId, _> = serde_json::from_str("\"Atlantis\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_location_index_matches_all() {
        for (i, id) in LocationId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn test_direction_inverse() {
        assert_eq!(Direction::North.inverse(), Some(Direction::South));
        assert_eq!(Direction::East.inverse(), Some(Direction::West));
        assert_eq!(Direction::West.inverse(), Some(Direction::East));
        assert_eq!(Direction::Treasure.inverse(), None);
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::parse("treasure"), Some(Direction::Treasure));
        assert_eq!(Direction::parse("up"), None);
    }

    #[test]
    fn test_seconds_between_never_negative() {
        assert_eq!(seconds_between(5_000, 2_000), 0.0);
        assert_eq!(seconds_between(1_000, 3_500), 2.5);
    }

    #[test]
    fn test_key_item_names() {
        let json = serde_json::to_string(&KeyItem::REQUIRED).unwrap();
        assert_eq!(json, r#"["Triangle Key","Stone Key","Forest Key"]"#);
    }
}
