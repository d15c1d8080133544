//! In-memory implementation of the `EventRepository` trait.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use glacial_core::error::DomainError;
use glacial_core::repository::{EventRepository, StoredEvent};

/// Process-local event store keyed by aggregate ID.
///
/// Appends are checked against the stream length under a write lock, so two
/// commands computed from the same version cannot both commit.
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    streams: RwLock<HashMap<Uuid, Vec<StoredEvent>>>,
}

impl InMemoryEventRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of aggregate streams held.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the lock is poisoned.
    pub fn stream_count(&self) -> Result<usize, DomainError> {
        let streams = self.streams.read().map_err(poisoned)?;
        Ok(streams.len())
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> DomainError {
    DomainError::Infrastructure(format!("event store lock poisoned: {err}"))
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        let streams = self.streams.read().map_err(poisoned)?;
        Ok(streams.get(&aggregate_id).cloned().unwrap_or_default())
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        let mut streams = self.streams.write().map_err(poisoned)?;

        let actual = streams
            .get(&aggregate_id)
            .map_or(0, |stream| i64::try_from(stream.len()).unwrap_or(i64::MAX));
        if actual != expected_version {
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id,
                expected: expected_version,
                actual,
            });
        }

        if events.is_empty() {
            return Ok(());
        }

        debug!(
            %aggregate_id,
            expected_version,
            count = events.len(),
            "appending events"
        );

        streams
            .entry(aggregate_id)
            .or_default()
            .extend_from_slice(events);
        Ok(())
    }
}
