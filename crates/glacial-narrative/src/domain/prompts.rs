//! Prompt construction for narration and scene images.

use glacial_rules::domain::stats::PlayerStats;
use glacial_world::domain::weather::Weather;

/// System instruction that casts the model as the game master.
pub const NARRATOR_SYSTEM_INSTRUCTION: &str = "You are an atmospheric game master for an Ice Age survival RPG. Your tone is serious, immersive, and descriptive of a harsh prehistoric world.";

/// Sampling temperature for narration.
pub const NARRATION_TEMPERATURE: f32 = 0.8;

/// Aspect ratio requested for scene images.
pub const SCENE_ASPECT_RATIO: &str = "16:9";

/// Everything the narrator needs to describe one player action.
#[derive(Debug, Clone)]
pub struct NarrationRequest {
    /// The player's free-text action.
    pub action: String,
    /// Display name of the player's location.
    pub location_name: String,
    /// Weather at the time of the action.
    pub weather: Weather,
    /// Stats before the action's effects.
    pub stats: PlayerStats,
    /// Carried items.
    pub inventory: Vec<String>,
}

impl NarrationRequest {
    /// Renders the user prompt.
    #[must_use]
    pub fn prompt(&self) -> String {
        let inventory = if self.inventory.is_empty() {
            "Empty".to_owned()
        } else {
            self.inventory.join(", ")
        };

        format!(
            "Player Action: \"{action}\" in the location \"{location}\".\n\
             Current Weather: {weather} ({weather_description}).\n\
             Player Stats: Warmth {warmth}%, Energy {energy}%, Health {health}%, Hunger {hunger}%.\n\
             Inventory: {inventory}.\n\
             \n\
             Narrate the outcome of this action in a gritty, atmospheric Ice Age setting.\n\
             Incorporate the current weather into the narrative (e.g., if it's a Blizzard, emphasize the blinding snow).\n\
             Keep it brief (2-3 sentences). Focus on nature, survival, and the cold.\n\
             Mention if stats change based on the environment and action.",
            action = self.action,
            location = self.location_name,
            weather = self.weather.kind.as_str(),
            weather_description = self.weather.description,
            warmth = self.stats.warmth,
            energy = self.stats.energy,
            health = self.stats.health,
            hunger = self.stats.hunger,
        )
    }
}

/// Everything the illustrator needs to paint the current scene.
#[derive(Debug, Clone)]
pub struct SceneRequest {
    /// Display name of the location.
    pub location_name: String,
    /// Location flavor text.
    pub description: String,
    /// Current weather.
    pub weather: Weather,
}

impl SceneRequest {
    /// Renders the image prompt.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!(
            "High-quality cinematic wide-angle shot of a prehistoric Ice Age setting: {}. \
             Weather: {}. {}. Realistic lighting, snow particles, deep blues and whites, \
             prehistoric flora. Digital art style.",
            self.location_name,
            self.weather.kind.as_str(),
            self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glacial_world::domain::weather::WeatherType;

    fn request(inventory: Vec<String>) -> NarrationRequest {
        NarrationRequest {
            action: "Build a fire".to_owned(),
            location_name: "Tundra Edge".to_owned(),
            weather: Weather::new(WeatherType::Blizzard, 0.9),
            stats: PlayerStats::new(80, 90, 100, 30),
            inventory,
        }
    }

    #[test]
    fn test_narration_prompt_carries_state() {
        let prompt = request(vec!["Sharp Flint".to_owned(), "Tattered Furs".to_owned()]).prompt();

        assert!(prompt.starts_with("Player Action: \"Build a fire\" in the location \"Tundra Edge\"."));
        assert!(prompt.contains("Current Weather: BLIZZARD (A violent storm of ice and wind. Lethal.)."));
        assert!(prompt.contains("Warmth 80%, Energy 90%, Health 100%, Hunger 30%."));
        assert!(prompt.contains("Inventory: Sharp Flint, Tattered Furs."));
        assert!(prompt.contains("Keep it brief (2-3 sentences)."));
    }

    #[test]
    fn test_narration_prompt_puts_state_and_instructions_on_separate_lines() {
        let prompt = request(vec!["Sharp Flint".to_owned()]).prompt();

        let lines: Vec<&str> = prompt.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines[1].starts_with("Current Weather: BLIZZARD"));
        assert_eq!(lines[3], "Inventory: Sharp Flint.");
        assert_eq!(lines[4], "");
        assert!(lines[5].starts_with("Narrate the outcome"));
        assert!(lines[8].starts_with("Mention if stats change"));
    }

    #[test]
    fn test_narration_prompt_marks_empty_inventory() {
        let prompt = request(Vec::new()).prompt();

        assert!(prompt.contains("Inventory: Empty."));
    }

    #[test]
    fn test_scene_prompt_names_location_and_weather() {
        let scene = SceneRequest {
            location_name: "Frozen Lake".to_owned(),
            description: "A glass-like surface stretching for miles.".to_owned(),
            weather: Weather::new(WeatherType::Foggy, 0.3),
        };

        let prompt = scene.prompt();

        assert!(prompt.contains("Ice Age setting: Frozen Lake."));
        assert!(prompt.contains("Weather: FOGGY. A glass-like surface stretching for miles.."));
        assert!(prompt.ends_with("Digital art style."));
    }
}
