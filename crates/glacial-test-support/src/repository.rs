//! Test repositories: mock `EventRepository` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use glacial_core::error::DomainError;
use glacial_core::repository::{EventRepository, StoredEvent};
use uuid::Uuid;

type AppendCall = (Uuid, i64, Vec<StoredEvent>);

/// An event repository that serves a seeded stream and records every
/// `append_events` call. Appends are also added to the stream, so a second
/// command in the same test sees the first one's events.
#[derive(Debug)]
pub struct RecordingEventRepository {
    stream: Mutex<Vec<StoredEvent>>,
    appended: Mutex<Vec<AppendCall>>,
}

impl RecordingEventRepository {
    /// Create a recording repository whose stream starts as `events`.
    #[must_use]
    pub fn new(events: Vec<StoredEvent>) -> Self {
        Self {
            stream: Mutex::new(events),
            appended: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all append calls as
    /// `(aggregate_id, expected_version, events)`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn appended_events(&self) -> Vec<AppendCall> {
        self.appended.lock().unwrap().clone()
    }

    /// Returns the current stream, seed plus appends.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn stream(&self) -> Vec<StoredEvent> {
        self.stream.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventRepository for RecordingEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Ok(self.stream.lock().unwrap().clone())
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        self.stream.lock().unwrap().extend_from_slice(events);
        self.appended
            .lock()
            .unwrap()
            .push((aggregate_id, expected_version, events.to_vec()));
        Ok(())
    }
}

/// An event repository that always returns an empty stream and silently
/// accepts appends. Useful for "session not found" scenarios.
#[derive(Debug)]
pub struct EmptyEventRepository;

#[async_trait]
impl EventRepository for EmptyEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Ok(vec![])
    }

    async fn append_events(
        &self,
        _aggregate_id: Uuid,
        _expected_version: i64,
        _events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        Ok(())
    }
}

/// An event repository whose storage is unreachable.
#[derive(Debug)]
pub struct FailingEventRepository;

#[async_trait]
impl EventRepository for FailingEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Err(DomainError::Infrastructure("event store unreachable".into()))
    }

    async fn append_events(
        &self,
        _aggregate_id: Uuid,
        _expected_version: i64,
        _events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("event store unreachable".into()))
    }
}
