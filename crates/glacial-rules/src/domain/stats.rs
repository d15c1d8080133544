//! Player survival stats.

use serde::{Deserialize, Serialize};

/// Upper bound shared by every stat.
pub const STAT_MAX: u8 = 100;

/// The four survival stats, each kept in `[0, STAT_MAX]`. Deserialized
/// values are clamped too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StatsRecord")]
pub struct PlayerStats {
    /// Body heat. Zero costs health every turn.
    pub warmth: u8,
    /// Stamina spent by acting and travelling.
    pub energy: u8,
    /// Overall condition.
    pub health: u8,
    /// Rises every turn; at the cap it costs health.
    pub hunger: u8,
}

/// Unchecked wire form of [`PlayerStats`].
#[derive(Deserialize)]
struct StatsRecord {
    warmth: u8,
    energy: u8,
    health: u8,
    hunger: u8,
}

impl From<StatsRecord> for PlayerStats {
    fn from(record: StatsRecord) -> Self {
        Self::new(record.warmth, record.energy, record.health, record.hunger)
    }
}

impl PlayerStats {
    /// Builds stats, clamping each value to the cap.
    #[must_use]
    pub fn new(warmth: u8, energy: u8, health: u8, hunger: u8) -> Self {
        Self {
            warmth: warmth.min(STAT_MAX),
            energy: energy.min(STAT_MAX),
            health: health.min(STAT_MAX),
            hunger: hunger.min(STAT_MAX),
        }
    }

    /// Stats at the start of every session.
    #[must_use]
    pub fn initial() -> Self {
        Self::new(80, 90, 100, 30)
    }
}

/// Adds `amount`, capping at [`STAT_MAX`].
#[must_use]
pub fn raise(value: u8, amount: u8) -> u8 {
    value.saturating_add(amount).min(STAT_MAX)
}

/// Subtracts `amount`, flooring at zero.
#[must_use]
pub fn lower(value: u8, amount: u8) -> u8 {
    value.saturating_sub(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_to_cap() {
        let stats = PlayerStats::new(250, 101, 100, 0);

        assert_eq!(stats, PlayerStats::new(100, 100, 100, 0));
    }

    #[test]
    fn test_deserialize_clamps_out_of_range_values() {
        let json = serde_json::json!({ "warmth": 180, "energy": 90, "health": 255, "hunger": 30 });

        let stats: PlayerStats = serde_json::from_value(json).unwrap();

        assert_eq!(stats, PlayerStats::new(100, 90, 100, 30));
    }

    #[test]
    fn test_raise_and_lower_saturate() {
        assert_eq!(raise(90, 35), 100);
        assert_eq!(raise(250, 10), 100);
        assert_eq!(lower(5, 8), 0);
        assert_eq!(lower(40, 8), 32);
    }

    #[test]
    fn test_initial_stats() {
        let stats = PlayerStats::initial();

        assert_eq!(stats.warmth, 80);
        assert_eq!(stats.energy, 90);
        assert_eq!(stats.health, 100);
        assert_eq!(stats.hunger, 30);
    }
}
