//! Shared application state.

use std::sync::{Arc, Mutex};

use glacial_core::clock::Clock;
use glacial_core::repository::EventRepository;
use glacial_core::rng::DeterministicRng;
use glacial_narrative::application::narration::{Narrator, SceneIllustrator};
use glacial_session::application::in_flight::InFlightCommands;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Time source for event metadata and log timestamps.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Weather randomizer. Locked only around synchronous rolls.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    /// Session event streams.
    pub event_repository: Arc<dyn EventRepository>,
    /// Narration for player actions.
    pub narrator: Arc<dyn Narrator>,
    /// Scene images.
    pub illustrator: Arc<dyn SceneIllustrator>,
    /// Sessions with a command in progress.
    pub in_flight: Arc<InFlightCommands>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        event_repository: Arc<dyn EventRepository>,
        narrator: Arc<dyn Narrator>,
        illustrator: Arc<dyn SceneIllustrator>,
    ) -> Self {
        Self {
            clock,
            rng,
            event_repository,
            narrator,
            illustrator,
            in_flight: Arc::new(InFlightCommands::new()),
        }
    }
}
