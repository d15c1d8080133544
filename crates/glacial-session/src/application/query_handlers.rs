//! Query handlers for the Session context.
//!
//! This module contains query handlers that reconstitute sessions from
//! stored events and return read-only view DTOs.

use chrono::{DateTime, Utc};
use glacial_core::error::DomainError;
use glacial_core::repository::EventRepository;
use glacial_rules::domain::decay::weather_effect;
use glacial_rules::domain::stats::PlayerStats;
use glacial_world::application::query_handlers::LocationView;
use glacial_world::domain::weather::WeatherType;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::log::LogRole;

/// Read-only view of the current weather.
#[derive(Debug, Serialize)]
pub struct WeatherView {
    /// Weather kind.
    #[serde(rename = "type")]
    pub kind: WeatherType,
    /// Strength in `[0, 1]`.
    pub intensity: f64,
    /// Flavor text.
    pub description: String,
    /// How the weather affects the player.
    pub effect: &'static str,
}

/// Read-only view of one log entry.
#[derive(Debug, Serialize)]
pub struct GameLogView {
    /// Speaker.
    pub role: LogRole,
    /// Label shown next to the entry.
    pub label: &'static str,
    /// Text of the entry.
    pub message: String,
    /// When the entry was written.
    pub timestamp: DateTime<Utc>,
    /// Scene image as a `data:` URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Read-only view of a game session.
#[derive(Debug, Serialize)]
pub struct GameSessionView {
    /// The session identifier.
    pub session_id: Uuid,
    /// Where the player stands.
    pub location: LocationView,
    /// Carried items.
    pub inventory: Vec<String>,
    /// Survival stats.
    pub stats: PlayerStats,
    /// Day counter.
    pub day: u32,
    /// Current weather.
    pub weather: WeatherView,
    /// Narrative log, oldest first.
    pub history: Vec<GameLogView>,
    /// Current version (event count).
    pub version: i64,
}

/// Retrieves a game session by its aggregate ID.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no events exist for the ID.
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub async fn get_session_by_id(
    session_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<GameSessionView, DomainError> {
    let stored_events = repo.load_events(session_id).await?;
    if stored_events.is_empty() {
        return Err(DomainError::AggregateNotFound(session_id));
    }
    let session = command_handlers::reconstitute(session_id, &stored_events)?;

    let weather = WeatherView {
        kind: session.weather.kind,
        intensity: session.weather.intensity,
        description: session.weather.description.clone(),
        effect: weather_effect(session.weather.kind),
    };
    let history = session
        .history
        .iter()
        .map(|entry| GameLogView {
            role: entry.role,
            label: entry.role.display_label(),
            message: entry.message.clone(),
            timestamp: entry.timestamp,
            image_url: entry.image_url.clone(),
        })
        .collect();

    Ok(GameSessionView {
        session_id,
        location: LocationView::from(session.location),
        inventory: session.inventory.clone(),
        stats: session.stats,
        day: session.day,
        weather,
        history,
        version: session.version,
    })
}
