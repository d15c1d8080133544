//! The decay rule engine.

use glacial_world::domain::weather::WeatherType;

use super::stats::{PlayerStats, STAT_MAX, lower, raise};

/// Warmth lost per turn in clear or foggy weather.
pub const BASE_WARMTH_DECAY: u8 = 8;
/// Energy lost per turn outside a blizzard.
pub const BASE_ENERGY_DECAY: u8 = 10;
/// Energy regained by resting.
pub const REST_ENERGY_GAIN: u8 = 20;
/// Extra warmth lost by resting in a blizzard without a fire.
pub const BLIZZARD_REST_CHILL: u8 = 15;
/// Hunger relieved by eating.
pub const MEAL_HUNGER_RELIEF: u8 = 25;
/// Hunger gained by any turn without eating.
pub const HUNGER_GAIN: u8 = 5;
/// Warmth regained at a fire.
pub const FIRE_WARMTH_GAIN: u8 = 35;
/// Health lost when freezing or starving.
pub const EXPOSURE_DAMAGE: u8 = 10;

/// Energy spent moving between locations outside a blizzard.
pub const TRAVEL_ENERGY_COST: u8 = 15;
/// Energy spent moving between locations in a blizzard.
pub const BLIZZARD_TRAVEL_ENERGY_COST: u8 = 25;

/// Per-turn warmth and energy decay for a weather type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decay {
    /// Warmth lost when the player does not warm up.
    pub warmth: u8,
    /// Energy lost when the player does not rest.
    pub energy: u8,
}

impl Decay {
    /// Looks up the decay for `weather`.
    #[must_use]
    pub fn for_weather(weather: WeatherType) -> Self {
        match weather {
            WeatherType::Blizzard => Self {
                warmth: 20,
                energy: 15,
            },
            WeatherType::Snowing => Self {
                warmth: 12,
                energy: BASE_ENERGY_DECAY,
            },
            WeatherType::Clear | WeatherType::Foggy => Self {
                warmth: BASE_WARMTH_DECAY,
                energy: BASE_ENERGY_DECAY,
            },
        }
    }
}

/// Keywords found in a free-text action. Matching is a case-insensitive
/// substring test, so "treat" counts as eating and "warmth" as warming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ActionKeywords {
    /// Mentions `rest` or `sleep`.
    pub rests: bool,
    /// Mentions `eat` or `consume`.
    pub eats: bool,
    /// Mentions `fire`.
    pub has_fire: bool,
    /// Mentions `fire` or `warm`.
    pub warms: bool,
}

impl ActionKeywords {
    /// Scans `action` for rule keywords.
    #[must_use]
    pub fn scan(action: &str) -> Self {
        let lower = action.to_lowercase();
        let has_fire = lower.contains("fire");
        Self {
            rests: lower.contains("rest") || lower.contains("sleep"),
            eats: lower.contains("eat") || lower.contains("consume"),
            has_fire,
            warms: has_fire || lower.contains("warm"),
        }
    }
}

/// Computes the stats after the player performs `action` in `weather`.
#[must_use]
pub fn apply_action(action: &str, weather: WeatherType, stats: PlayerStats) -> PlayerStats {
    let keywords = ActionKeywords::scan(action);
    let decay = Decay::for_weather(weather);
    let mut next = stats;

    if keywords.rests {
        next.energy = raise(next.energy, REST_ENERGY_GAIN);
        if weather == WeatherType::Blizzard && !keywords.has_fire {
            next.warmth = lower(next.warmth, BLIZZARD_REST_CHILL);
        }
    } else {
        next.energy = lower(next.energy, decay.energy);
    }

    next.hunger = if keywords.eats {
        lower(next.hunger, MEAL_HUNGER_RELIEF)
    } else {
        raise(next.hunger, HUNGER_GAIN)
    };

    next.warmth = if keywords.warms {
        raise(next.warmth, FIRE_WARMTH_GAIN)
    } else {
        lower(next.warmth, decay.warmth)
    };

    if next.warmth == 0 || next.hunger == STAT_MAX {
        next.health = lower(next.health, EXPOSURE_DAMAGE);
    }

    next
}

/// Energy spent travelling one edge of the map in `weather`.
#[must_use]
pub fn travel_energy_cost(weather: WeatherType) -> u8 {
    if weather == WeatherType::Blizzard {
        BLIZZARD_TRAVEL_ENERGY_COST
    } else {
        TRAVEL_ENERGY_COST
    }
}

/// Computes the stats after travelling in `weather`. Only energy changes.
#[must_use]
pub fn apply_travel(weather: WeatherType, stats: PlayerStats) -> PlayerStats {
    PlayerStats {
        energy: lower(stats.energy, travel_energy_cost(weather)),
        ..stats
    }
}

/// Short label describing how `weather` affects the player.
#[must_use]
pub fn weather_effect(weather: WeatherType) -> &'static str {
    match weather {
        WeatherType::Blizzard => "Rapid Warmth Loss",
        WeatherType::Snowing => "Moderate Warmth Loss",
        WeatherType::Foggy => "Reduced Visibility",
        WeatherType::Clear => "Normal Stat Decay",
    }
}
