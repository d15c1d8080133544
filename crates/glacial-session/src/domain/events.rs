//! Domain events for the Session context.

use glacial_core::event::{DomainEvent, EventMetadata};
use glacial_rules::domain::stats::PlayerStats;
use glacial_world::domain::locations::LocationId;
use glacial_world::domain::weather::Weather;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Emitted once when a session begins. Carries the full starting state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStarted {
    /// The session identifier.
    pub session_id: Uuid,
    /// Starting location.
    pub location: LocationId,
    /// Starting items.
    pub inventory: Vec<String>,
    /// Starting stats.
    pub stats: PlayerStats,
    /// Starting day.
    pub day: u32,
    /// Starting weather.
    pub weather: Weather,
    /// Opening line of the log.
    pub message: String,
}

/// Emitted when the player submits an action, before it is narrated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionSubmitted {
    /// The action as typed.
    pub action: String,
}

/// Emitted when an action has been narrated and its cost settled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionNarrated {
    /// Narration text, or a fallback line.
    pub narration: String,
    /// Stats after the decay rules.
    pub stats: PlayerStats,
}

/// Emitted when the player moves to an adjacent location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Travelled {
    /// Where the player left.
    pub from: LocationId,
    /// Where the player arrived.
    pub destination: LocationId,
    /// Stats after the energy cost.
    pub stats: PlayerStats,
    /// Arrival line for the log.
    pub message: String,
}

/// Emitted when the weather roll produces new weather.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherShifted {
    /// The new weather.
    pub weather: Weather,
    /// Log line announcing the change.
    pub message: String,
}

/// Emitted when an image of the current scene came back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneVisualized {
    /// Scene image as a `data:` URL.
    pub image_url: String,
    /// Caption for the log.
    pub message: String,
}

/// Event type identifier for [`SessionStarted`].
pub const SESSION_STARTED_EVENT_TYPE: &str = "session.started";

/// Event type identifier for [`ActionSubmitted`].
pub const ACTION_SUBMITTED_EVENT_TYPE: &str = "session.action_submitted";

/// Event type identifier for [`ActionNarrated`].
pub const ACTION_NARRATED_EVENT_TYPE: &str = "session.action_narrated";

/// Event type identifier for [`Travelled`].
pub const TRAVELLED_EVENT_TYPE: &str = "session.travelled";

/// Event type identifier for [`WeatherShifted`].
pub const WEATHER_SHIFTED_EVENT_TYPE: &str = "session.weather_shifted";

/// Event type identifier for [`SceneVisualized`].
pub const SCENE_VISUALIZED_EVENT_TYPE: &str = "session.scene_visualized";

/// Event payload variants for the Session context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEventKind {
    /// A session has started.
    SessionStarted(SessionStarted),
    /// An action was submitted.
    ActionSubmitted(ActionSubmitted),
    /// An action was narrated.
    ActionNarrated(ActionNarrated),
    /// The player travelled.
    Travelled(Travelled),
    /// The weather changed.
    WeatherShifted(WeatherShifted),
    /// A scene image was produced.
    SceneVisualized(SceneVisualized),
}

impl SessionEventKind {
    /// Returns the event type name for this payload.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::SessionStarted(_) => SESSION_STARTED_EVENT_TYPE,
            Self::ActionSubmitted(_) => ACTION_SUBMITTED_EVENT_TYPE,
            Self::ActionNarrated(_) => ACTION_NARRATED_EVENT_TYPE,
            Self::Travelled(_) => TRAVELLED_EVENT_TYPE,
            Self::WeatherShifted(_) => WEATHER_SHIFTED_EVENT_TYPE,
            Self::SceneVisualized(_) => SCENE_VISUALIZED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Session context.
#[derive(Debug, Clone)]
pub struct SessionEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: SessionEventKind,
}

impl DomainEvent for SessionEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("SessionEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
