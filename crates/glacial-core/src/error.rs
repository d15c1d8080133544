//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A game session (or other aggregate) was not found.
    #[error("aggregate not found: {0}")]
    AggregateNotFound(Uuid),

    /// A location identifier did not match any known location.
    #[error("location not found: {0}")]
    LocationNotFound(String),

    /// Another command committed to the same stream first.
    #[error("concurrency conflict on aggregate {aggregate_id}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        /// The aggregate that had the conflict.
        aggregate_id: Uuid,
        /// The version the command was computed against.
        expected: i64,
        /// The version found in the store.
        actual: i64,
    },

    /// Another command on the same session has not finished yet.
    #[error("a command is already in flight for session {0}")]
    CommandInFlight(Uuid),

    /// The command was rejected by game rules or input validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
