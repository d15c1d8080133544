//! Weather table and randomizer.

use glacial_core::rng::DeterministicRng;
use serde::{Deserialize, Serialize};

/// A roll must exceed this for the weather to change at all.
pub const WEATHER_CHANGE_THRESHOLD: f64 = 0.7;

/// Kind of weather over the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeatherType {
    /// Clear skies.
    Clear,
    /// Freezing fog.
    Foggy,
    /// Steady snowfall.
    Snowing,
    /// Whiteout storm.
    Blizzard,
}

impl WeatherType {
    /// Every weather type, in roll order.
    pub const ALL: [Self; 4] = [Self::Clear, Self::Foggy, Self::Snowing, Self::Blizzard];

    /// Upper-case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "CLEAR",
            Self::Foggy => "FOGGY",
            Self::Snowing => "SNOWING",
            Self::Blizzard => "BLIZZARD",
        }
    }

    /// Lower-case name used inside narrative sentences.
    #[must_use]
    pub const fn lowercase(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Foggy => "foggy",
            Self::Snowing => "snowing",
            Self::Blizzard => "blizzard",
        }
    }

    /// Fixed flavor text for this weather.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Clear => "Bitingly clear and cold.",
            Self::Foggy => "A thick, freezing mist obscures the world.",
            Self::Snowing => "Heavy flakes drift from a grey sky.",
            Self::Blizzard => "A violent storm of ice and wind. Lethal.",
        }
    }
}

/// Current weather conditions. Deserializing rebuilds the value through
/// [`Weather::new`], so intensity stays in range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WeatherRecord")]
pub struct Weather {
    /// Weather kind.
    #[serde(rename = "type")]
    pub kind: WeatherType,
    /// Strength in `[0, 1]`.
    pub intensity: f64,
    /// Flavor text.
    pub description: String,
}

/// Unchecked wire form of [`Weather`].
#[derive(Deserialize)]
struct WeatherRecord {
    #[serde(rename = "type")]
    kind: WeatherType,
    intensity: f64,
}

impl From<WeatherRecord> for Weather {
    fn from(record: WeatherRecord) -> Self {
        Self::new(record.kind, record.intensity)
    }
}

impl Weather {
    /// Builds weather of `kind` with the table description. `intensity` is
    /// clamped to `[0, 1]`.
    #[must_use]
    pub fn new(kind: WeatherType, intensity: f64) -> Self {
        Self {
            kind,
            intensity: intensity.clamp(0.0, 1.0),
            description: kind.description().to_owned(),
        }
    }

    /// Weather at the start of every session.
    #[must_use]
    pub fn initial() -> Self {
        Self::new(WeatherType::Clear, 0.2)
    }
}

/// Rolls for a weather change after a player turn.
///
/// Three draws, in order: a chance in `[0, 1)` that must exceed
/// [`WEATHER_CHANGE_THRESHOLD`], an index into [`WeatherType::ALL`], and the
/// new intensity. Rolling the current type again is no change.
pub fn roll_for_weather_change(
    current: WeatherType,
    rng: &mut dyn DeterministicRng,
) -> Option<Weather> {
    let chance = rng.next_f64();
    if chance <= WEATHER_CHANGE_THRESHOLD {
        return None;
    }

    let index = rng.next_u32_range(0, 3) as usize;
    let kind = *WeatherType::ALL.get(index)?;
    if kind == current {
        return None;
    }

    Some(Weather::new(kind, rng.next_f64()))
}
