//! Per-session admission of one command at a time.
//!
//! A command claims its session before loading it and holds the claim until
//! it has committed. A second command on the same session is turned away
//! with `DomainError::CommandInFlight` before it calls out to any model, so
//! the first action a player submits is the one that counts. The version
//! check on append still catches writers that bypass the guard.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use glacial_core::error::DomainError;
use uuid::Uuid;

/// Set of sessions with a command in progress.
#[derive(Debug, Default)]
pub struct InFlightCommands {
    sessions: Mutex<HashSet<Uuid>>,
}

impl InFlightCommands {
    /// Creates an empty guard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `session_id` for the caller. The claim is released when the
    /// returned value is dropped.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CommandInFlight` if the session is already
    /// claimed.
    pub fn claim(&self, session_id: Uuid) -> Result<InFlightClaim<'_>, DomainError> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        if !sessions.insert(session_id) {
            return Err(DomainError::CommandInFlight(session_id));
        }
        Ok(InFlightClaim {
            owner: self,
            session_id,
        })
    }

    /// Whether a command currently holds `session_id`.
    #[must_use]
    pub fn is_claimed(&self, session_id: Uuid) -> bool {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&session_id)
    }
}

/// A held claim on one session.
#[derive(Debug)]
pub struct InFlightClaim<'a> {
    owner: &'a InFlightCommands,
    session_id: Uuid,
}

impl Drop for InFlightClaim<'_> {
    fn drop(&mut self) {
        self.owner
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.session_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_claim_on_same_session_is_rejected() {
        let in_flight = InFlightCommands::new();
        let session_id = Uuid::new_v4();

        let _held = in_flight.claim(session_id).unwrap();
        let second = in_flight.claim(session_id);

        match second {
            Err(DomainError::CommandInFlight(id)) => assert_eq!(id, session_id),
            other => panic!("expected CommandInFlight, got {other:?}"),
        }
    }

    #[test]
    fn test_dropping_claim_releases_session() {
        let in_flight = InFlightCommands::new();
        let session_id = Uuid::new_v4();

        drop(in_flight.claim(session_id).unwrap());

        assert!(!in_flight.is_claimed(session_id));
        assert!(in_flight.claim(session_id).is_ok());
    }

    #[test]
    fn test_claims_on_different_sessions_are_independent() {
        let in_flight = InFlightCommands::new();

        let _first = in_flight.claim(Uuid::new_v4()).unwrap();
        let second = in_flight.claim(Uuid::new_v4());

        assert!(second.is_ok());
    }
}
