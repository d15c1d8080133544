//! Command handlers for the Session context.
//!
//! Each handler claims the session, loads it, runs the domain methods, and
//! appends the produced events in one batch at the version it loaded. A
//! command arriving while another holds the session fails with
//! `DomainError::CommandInFlight` before doing any work. A writer that skips
//! the claim and commits first makes the append fail with
//! `DomainError::ConcurrencyConflict`.

use std::sync::Mutex;

use glacial_core::aggregate::AggregateRoot;
use glacial_core::clock::Clock;
use glacial_core::error::DomainError;
use glacial_core::event::{DomainEvent, EventMetadata};
use glacial_core::repository::{EventRepository, StoredEvent};
use glacial_core::rng::DeterministicRng;
use glacial_narrative::application::narration::{
    Narrator, SceneIllustrator, illustrate_or_none, narrate_or_fallback,
};
use tracing::info;
use uuid::Uuid;

use crate::application::in_flight::InFlightCommands;
use crate::domain::aggregates::GameSession;
use crate::domain::commands::{PerformAction, StartSession, Travel, VisualizeScene};
use crate::domain::events::{SessionEvent, SessionEventKind};

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct SessionCommandResult {
    /// The session affected or created by the command.
    pub aggregate_id: Uuid,
    /// The stored events produced and persisted. Empty for no-op commands.
    pub stored_events: Vec<StoredEvent>,
}

/// Reconstitutes a `GameSession` from stored events.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub(crate) fn reconstitute(
    session_id: Uuid,
    existing_events: &[StoredEvent],
) -> Result<GameSession, DomainError> {
    let mut session = GameSession::new(session_id);
    for stored in existing_events {
        let kind: SessionEventKind =
            serde_json::from_value(stored.payload.clone()).map_err(|e| {
                DomainError::Infrastructure(format!("event deserialization failed: {e}"))
            })?;
        let event = SessionEvent {
            metadata: EventMetadata::from_stored(stored),
            kind,
        };
        session.apply(&event);
    }
    Ok(session)
}

async fn load_session(
    session_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<GameSession, DomainError> {
    let existing_events = repo.load_events(session_id).await?;
    if existing_events.is_empty() {
        return Err(DomainError::AggregateNotFound(session_id));
    }
    reconstitute(session_id, &existing_events)
}

async fn commit(
    session: &mut GameSession,
    repo: &dyn EventRepository,
) -> Result<SessionCommandResult, DomainError> {
    let stored_events: Vec<StoredEvent> = session
        .uncommitted_events()
        .iter()
        .map(DomainEvent::to_stored_event)
        .collect();

    if !stored_events.is_empty() {
        repo.append_events(session.id, session.version(), &stored_events)
            .await?;
    }
    session.clear_uncommitted_events();

    Ok(SessionCommandResult {
        aggregate_id: session.id,
        stored_events,
    })
}

fn roll_weather(
    session: &mut GameSession,
    correlation_id: Uuid,
    clock: &dyn Clock,
    rng: &Mutex<dyn DeterministicRng + Send>,
) -> Result<(), DomainError> {
    // Lock RNG only for the synchronous domain method, never across an await.
    let mut rng_guard = rng
        .lock()
        .map_err(|e| DomainError::Infrastructure(format!("RNG mutex poisoned: {e}")))?;
    session.roll_weather(correlation_id, clock, &mut *rng_guard);
    Ok(())
}

/// Handles the `StartSession` command: creates a new session in its initial
/// state and persists the `SessionStarted` event.
///
/// # Errors
///
/// Returns `DomainError` if event appending fails.
pub async fn handle_start_session(
    command: &StartSession,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<SessionCommandResult, DomainError> {
    let mut session = GameSession::new(Uuid::new_v4());
    session.start(command.correlation_id, clock)?;

    let result = commit(&mut session, repo).await?;
    info!(session_id = %result.aggregate_id, "session started");
    Ok(result)
}

/// Handles the `PerformAction` command: records the action, asks for
/// narration from the pre-action state, applies the decay rules, rolls for a
/// weather change, and persists everything in one batch.
///
/// Narration failures never fail the command; the fallback line is logged
/// instead.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a blank action,
/// `DomainError::CommandInFlight` while another command holds the session,
/// `DomainError::AggregateNotFound` for an unknown session, and
/// `DomainError::ConcurrencyConflict` if another writer committed first.
pub async fn handle_perform_action(
    command: &PerformAction,
    clock: &dyn Clock,
    rng: &Mutex<dyn DeterministicRng + Send>,
    narrator: &dyn Narrator,
    in_flight: &InFlightCommands,
    repo: &dyn EventRepository,
) -> Result<SessionCommandResult, DomainError> {
    if command.action.trim().is_empty() {
        return Err(DomainError::Validation("action must not be empty".to_owned()));
    }

    let _claim = in_flight.claim(command.session_id)?;
    let mut session = load_session(command.session_id, repo).await?;
    session.submit_action(&command.action, command.correlation_id, clock)?;

    let request = session.narration_request(&command.action);
    let narration = narrate_or_fallback(narrator, &request).await;

    session.settle_action(&command.action, narration, command.correlation_id, clock);
    roll_weather(&mut session, command.correlation_id, clock, rng)?;

    commit(&mut session, repo).await
}

/// Handles the `Travel` command: moves the player to an adjacent location,
/// charges the energy cost, and rolls for a weather change. Travelling to
/// the current location is a no-op that persists nothing.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the destination is not adjacent,
/// `DomainError::CommandInFlight` while another command holds the session,
/// `DomainError::AggregateNotFound` for an unknown session, and
/// `DomainError::ConcurrencyConflict` if another writer committed first.
pub async fn handle_travel(
    command: &Travel,
    clock: &dyn Clock,
    rng: &Mutex<dyn DeterministicRng + Send>,
    in_flight: &InFlightCommands,
    repo: &dyn EventRepository,
) -> Result<SessionCommandResult, DomainError> {
    let _claim = in_flight.claim(command.session_id)?;
    let mut session = load_session(command.session_id, repo).await?;

    if session.travel(command.destination, command.correlation_id, clock)? {
        roll_weather(&mut session, command.correlation_id, clock, rng)?;
    }

    commit(&mut session, repo).await
}

/// Handles the `VisualizeScene` command: asks for an image of the current
/// location and weather and records it when one came back.
///
/// # Errors
///
/// Returns `DomainError::CommandInFlight` while another command holds the
/// session, `DomainError::AggregateNotFound` for an unknown session, and
/// `DomainError::ConcurrencyConflict` if another writer committed first.
pub async fn handle_visualize_scene(
    command: &VisualizeScene,
    clock: &dyn Clock,
    illustrator: &dyn SceneIllustrator,
    in_flight: &InFlightCommands,
    repo: &dyn EventRepository,
) -> Result<SessionCommandResult, DomainError> {
    let _claim = in_flight.claim(command.session_id)?;
    let mut session = load_session(command.session_id, repo).await?;

    let request = session.scene_request();
    if let Some(image_url) = illustrate_or_none(illustrator, &request).await {
        session.record_scene(image_url, command.correlation_id, clock);
    } else {
        info!(session_id = %command.session_id, "no scene image produced");
    }

    commit(&mut session, repo).await
}
