//! Narrative error types.

use thiserror::Error;

/// Failure talking to the remote generative model.
#[derive(Debug, Error)]
pub enum NarrationError {
    /// The request never completed (connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("model service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("response decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
