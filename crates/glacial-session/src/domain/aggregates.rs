//! Aggregate roots for the Session context.

use glacial_core::aggregate::AggregateRoot;
use glacial_core::clock::Clock;
use glacial_core::error::DomainError;
use glacial_core::event::EventMetadata;
use glacial_core::rng::DeterministicRng;
use glacial_narrative::domain::prompts::{NarrationRequest, SceneRequest};
use glacial_rules::domain::decay::{apply_action, apply_travel};
use glacial_rules::domain::stats::PlayerStats;
use glacial_world::domain::locations::LocationId;
use glacial_world::domain::weather::{Weather, roll_for_weather_change};
use uuid::Uuid;

use super::events::{
    ActionNarrated, ActionSubmitted, SceneVisualized, SessionEvent, SessionEventKind,
    SessionStarted, Travelled, WeatherShifted,
};
use super::log::{GameLog, LogRole};

/// Opening line of every session.
pub const OPENING_MESSAGE: &str = "You awake on the edge of a vast, frozen tundra. The wind bites at your exposed skin. Survival is your only goal.";

/// Items every session starts with.
pub const STARTING_INVENTORY: [&str; 2] = ["Sharp Flint", "Tattered Furs"];

/// Rejection for travel to a location that is not adjacent.
pub const UNREACHABLE_MESSAGE: &str = "You cannot reach that location from here.";

/// The aggregate root for one player's game.
#[derive(Debug)]
pub struct GameSession {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    /// Whether `SessionStarted` has been applied.
    pub(crate) started: bool,
    /// Where the player stands.
    pub(crate) location: LocationId,
    /// Carried items.
    pub(crate) inventory: Vec<String>,
    /// Survival stats.
    pub(crate) stats: PlayerStats,
    /// Day counter.
    pub(crate) day: u32,
    /// Current weather.
    pub(crate) weather: Weather,
    /// Narrative log, oldest first.
    pub(crate) history: Vec<GameLog>,
    /// Uncommitted events pending persistence.
    uncommitted_events: Vec<SessionEvent>,
}

impl GameSession {
    /// Creates an empty, not yet started session.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            started: false,
            location: LocationId::TundraEdge,
            inventory: Vec::new(),
            stats: PlayerStats::initial(),
            day: 1,
            weather: Weather::initial(),
            history: Vec::new(),
            uncommitted_events: Vec::new(),
        }
    }

    /// Returns the next sequence number for a new event.
    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.version + self.uncommitted_events.len() as i64 + 1
    }

    fn record(&mut self, kind: SessionEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let event = SessionEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                aggregate_id: self.id,
                sequence_number: self.next_sequence_number(),
                correlation_id,
                causation_id: correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };
        self.uncommitted_events.push(event);
    }

    /// Starts the session, producing a `SessionStarted` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the session already started.
    pub fn start(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        if self.started {
            return Err(DomainError::Validation(
                "session has already started".to_owned(),
            ));
        }

        let kind = SessionEventKind::SessionStarted(SessionStarted {
            session_id: self.id,
            location: LocationId::TundraEdge,
            inventory: STARTING_INVENTORY.iter().map(|&s| s.to_owned()).collect(),
            stats: PlayerStats::initial(),
            day: 1,
            weather: Weather::initial(),
            message: OPENING_MESSAGE.to_owned(),
        });
        self.record(kind, correlation_id, clock);
        Ok(())
    }

    /// Records the player's action, producing an `ActionSubmitted` event.
    /// The event time is the log entry's time, so call this before awaiting
    /// the narration.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the action is blank.
    pub fn submit_action(
        &mut self,
        action: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if action.trim().is_empty() {
            return Err(DomainError::Validation("action must not be empty".to_owned()));
        }

        let kind = SessionEventKind::ActionSubmitted(ActionSubmitted {
            action: action.to_owned(),
        });
        self.record(kind, correlation_id, clock);
        Ok(())
    }

    /// Settles an action: runs the decay rules against the current stats and
    /// weather, producing an `ActionNarrated` event.
    pub fn settle_action(
        &mut self,
        action: &str,
        narration: String,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        let stats = apply_action(action, self.weather.kind, self.stats);
        let kind = SessionEventKind::ActionNarrated(ActionNarrated { narration, stats });
        self.record(kind, correlation_id, clock);
    }

    /// Moves the player, producing a `Travelled` event. Returns `false`
    /// without producing anything when `destination` is the current location.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `destination` is not adjacent.
    pub fn travel(
        &mut self,
        destination: LocationId,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<bool, DomainError> {
        if destination == self.location {
            return Ok(false);
        }
        if !self.location.location().connects_to(destination) {
            return Err(DomainError::Validation(UNREACHABLE_MESSAGE.to_owned()));
        }

        let place = destination.location();
        let message = format!(
            "You struggle through the {} to reach {}. {}",
            self.weather.kind.lowercase(),
            place.name,
            place.description
        );
        let kind = SessionEventKind::Travelled(Travelled {
            from: self.location,
            destination,
            stats: apply_travel(self.weather.kind, self.stats),
            message,
        });
        self.record(kind, correlation_id, clock);
        Ok(true)
    }

    /// Rolls for a weather change, producing a `WeatherShifted` event when
    /// the weather actually changes.
    pub fn roll_weather(
        &mut self,
        correlation_id: Uuid,
        clock: &dyn Clock,
        rng: &mut dyn DeterministicRng,
    ) {
        if let Some(weather) = roll_for_weather_change(self.weather.kind, rng) {
            let message = format!("The weather shifts. {}", weather.description);
            let kind = SessionEventKind::WeatherShifted(WeatherShifted { weather, message });
            self.record(kind, correlation_id, clock);
        }
    }

    /// Records a scene image, producing a `SceneVisualized` event.
    pub fn record_scene(&mut self, image_url: String, correlation_id: Uuid, clock: &dyn Clock) {
        let message = format!(
            "Behold, {} under the {} sky:",
            self.location.location().name,
            self.weather.kind.lowercase()
        );
        let kind = SessionEventKind::SceneVisualized(SceneVisualized { image_url, message });
        self.record(kind, correlation_id, clock);
    }

    /// What the narrator needs to describe `action` from the current state.
    #[must_use]
    pub fn narration_request(&self, action: &str) -> NarrationRequest {
        NarrationRequest {
            action: action.to_owned(),
            location_name: self.location.location().name.to_owned(),
            weather: self.weather.clone(),
            stats: self.stats,
            inventory: self.inventory.clone(),
        }
    }

    /// What the illustrator needs to paint the current scene.
    #[must_use]
    pub fn scene_request(&self) -> SceneRequest {
        let place = self.location.location();
        SceneRequest {
            location_name: place.name.to_owned(),
            description: place.description.to_owned(),
            weather: self.weather.clone(),
        }
    }
}

impl AggregateRoot for GameSession {
    type Event = SessionEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        let at = event.metadata.occurred_at;
        match &event.kind {
            SessionEventKind::SessionStarted(payload) => {
                self.started = true;
                self.location = payload.location;
                self.inventory.clone_from(&payload.inventory);
                self.stats = payload.stats;
                self.day = payload.day;
                self.weather = payload.weather.clone();
                self.history
                    .push(GameLog::new(LogRole::System, payload.message.clone(), at));
            }
            SessionEventKind::ActionSubmitted(payload) => {
                self.history
                    .push(GameLog::new(LogRole::User, payload.action.clone(), at));
            }
            SessionEventKind::ActionNarrated(payload) => {
                self.stats = payload.stats;
                self.history
                    .push(GameLog::new(LogRole::Ai, payload.narration.clone(), at));
            }
            SessionEventKind::Travelled(payload) => {
                self.location = payload.destination;
                self.stats = payload.stats;
                self.history
                    .push(GameLog::new(LogRole::System, payload.message.clone(), at));
            }
            SessionEventKind::WeatherShifted(payload) => {
                self.weather = payload.weather.clone();
                self.history
                    .push(GameLog::new(LogRole::System, payload.message.clone(), at));
            }
            SessionEventKind::SceneVisualized(payload) => {
                let mut entry = GameLog::new(LogRole::Ai, payload.message.clone(), at);
                entry.image_url = Some(payload.image_url.clone());
                self.history.push(entry);
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
