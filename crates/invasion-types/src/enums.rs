//! Enumeration types for the alien invasion simulator.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a direction name or code is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction provided: {0}")]
pub struct UnknownDirection(pub String);

/// A compass direction keying one outgoing link of a city.
///
/// The declaration order is the canonical rendering order:
/// North, East, South, West.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Link slot pointing north.
    North,
    /// Link slot pointing east.
    East,
    /// Link slot pointing south.
    South,
    /// Link slot pointing west.
    West,
}

impl Direction {
    /// All directions in canonical order.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// The lowercase name used in map files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }

    /// Parse an exact, case-sensitive direction name.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownDirection`] for anything other than `north`,
    /// `east`, `south` or `west`.
    pub fn parse(name: &str) -> Result<Self, UnknownDirection> {
        match name {
            "north" => Ok(Self::North),
            "east" => Ok(Self::East),
            "south" => Ok(Self::South),
            "west" => Ok(Self::West),
            other => Err(UnknownDirection(other.to_owned())),
        }
    }

    /// Numeric code of the direction (1 = North .. 4 = West).
    pub const fn code(self) -> u8 {
        match self {
            Self::North => 1,
            Self::East => 2,
            Self::South => 3,
            Self::West => 4,
        }
    }
}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<u8> for Direction {
    type Error = UnknownDirection;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::North),
            2 => Ok(Self::East),
            3 => Ok(Self::South),
            4 => Ok(Self::West),
            other => Err(UnknownDirection(other.to_string())),
        }
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
