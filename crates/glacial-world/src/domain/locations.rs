//! The static location graph.

use std::fmt;
use std::str::FromStr;

use glacial_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Identifier of a location on the frozen frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationId {
    /// Tundra Edge, where every session begins.
    TundraEdge,
    /// Pine Heart Forest.
    PineHeart,
    /// Mammoth Valley.
    MammothValley,
    /// Crystal Cave.
    CrystalCave,
    /// The Glacial Wall.
    GlacialWall,
    /// Frozen Lake.
    FrozenLake,
}

impl LocationId {
    /// Every location, in map order.
    pub const ALL: [Self; 6] = [
        Self::TundraEdge,
        Self::PineHeart,
        Self::MammothValley,
        Self::CrystalCave,
        Self::GlacialWall,
        Self::FrozenLake,
    ];

    /// The snake-case identifier used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TundraEdge => "tundra_edge",
            Self::PineHeart => "pine_heart",
            Self::MammothValley => "mammoth_valley",
            Self::CrystalCave => "crystal_cave",
            Self::GlacialWall => "glacial_wall",
            Self::FrozenLake => "frozen_lake",
        }
    }

    /// Returns the static record for this location.
    #[must_use]
    pub const fn location(self) -> &'static Location {
        match self {
            Self::TundraEdge => &TUNDRA_EDGE,
            Self::PineHeart => &PINE_HEART,
            Self::MammothValley => &MAMMOTH_VALLEY,
            Self::CrystalCave => &CRYSTAL_CAVE,
            Self::GlacialWall => &GLACIAL_WALL,
            Self::FrozenLake => &FROZEN_LAKE,
        }
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| DomainError::LocationNotFound(s.to_owned()))
    }
}

/// A place the player can stand. Static and immutable.
#[derive(Debug, PartialEq, Eq)]
pub struct Location {
    /// Identifier.
    pub id: LocationId,
    /// Display name.
    pub name: &'static str,
    /// Flavor text shown on arrival.
    pub description: &'static str,
    /// Locations reachable in one move.
    pub connections: &'static [LocationId],
}

impl Location {
    /// Returns whether `destination` is one move away from this location.
    #[must_use]
    pub fn connects_to(&self, destination: LocationId) -> bool {
        self.connections.contains(&destination)
    }
}

/// Returns whether the player can move directly from `from` to `to`.
#[must_use]
pub fn can_travel(from: LocationId, to: LocationId) -> bool {
    from.location().connects_to(to)
}

static TUNDRA_EDGE: Location = Location {
    id: LocationId::TundraEdge,
    name: "Tundra Edge",
    description: "A vast expanse of permafrost where the sky meets the ice. Sparse shrubs struggle against the wind.",
    connections: &[LocationId::PineHeart, LocationId::GlacialWall],
};

static PINE_HEART: Location = Location {
    id: LocationId::PineHeart,
    name: "Pine Heart Forest",
    description: "Ancient, towering pines laden with heavy snow. The air is still, but you feel eyes watching from the shadows.",
    connections: &[
        LocationId::TundraEdge,
        LocationId::MammothValley,
        LocationId::CrystalCave,
    ],
};

static MAMMOTH_VALLEY: Location = Location {
    id: LocationId::MammothValley,
    name: "Mammoth Valley",
    description: "A wide valley where the great woolly behemoths roam. Steam rises from hidden geothermal vents.",
    connections: &[LocationId::PineHeart, LocationId::FrozenLake],
};

static CRYSTAL_CAVE: Location = Location {
    id: LocationId::CrystalCave,
    name: "Crystal Cave",
    description: "A subterranean labyrinth lined with glowing ice crystals. Shelter from the blizzard, but dangers lurk within.",
    connections: &[LocationId::PineHeart],
};

static GLACIAL_WALL: Location = Location {
    id: LocationId::GlacialWall,
    name: "The Glacial Wall",
    description: "A towering cliff of solid blue ice. Rumors say a path leads to the verdant peaks beyond.",
    connections: &[LocationId::TundraEdge],
};

static FROZEN_LAKE: Location = Location {
    id: LocationId::FrozenLake,
    name: "Frozen Lake",
    description: "A glass-like surface stretching for miles. Perfect for travel, if the ice holds your weight.",
    connections: &[LocationId::MammothValley],
};
