//! Test narrators: canned `Narrator` and `SceneIllustrator` implementations.

use std::sync::Mutex;

use async_trait::async_trait;
use glacial_narrative::application::narration::{Narrator, SceneIllustrator};
use glacial_narrative::domain::prompts::{NarrationRequest, SceneRequest};
use glacial_narrative::error::NarrationError;

/// A narrator that always answers with the same text and records every
/// request it receives.
#[derive(Debug)]
pub struct ScriptedNarrator {
    reply: String,
    requests: Mutex<Vec<NarrationRequest>>,
}

impl ScriptedNarrator {
    /// Create a narrator that answers every request with `reply`.
    #[must_use]
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all requests received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<NarrationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Narrator for ScriptedNarrator {
    async fn narrate(&self, request: &NarrationRequest) -> Result<String, NarrationError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.reply.clone())
    }
}

/// A narrator and illustrator whose service is always down.
#[derive(Debug)]
pub struct FailingNarrator;

#[async_trait]
impl Narrator for FailingNarrator {
    async fn narrate(&self, _request: &NarrationRequest) -> Result<String, NarrationError> {
        Err(NarrationError::Status {
            status: 503,
            body: "service unavailable".into(),
        })
    }
}

#[async_trait]
impl SceneIllustrator for FailingNarrator {
    async fn illustrate(&self, _request: &SceneRequest) -> Result<Option<String>, NarrationError> {
        Err(NarrationError::Status {
            status: 503,
            body: "service unavailable".into(),
        })
    }
}

/// An illustrator that returns a fixed image (or none) and records every
/// request it receives.
#[derive(Debug)]
pub struct ScriptedIllustrator {
    image: Option<String>,
    requests: Mutex<Vec<SceneRequest>>,
}

impl ScriptedIllustrator {
    /// Create an illustrator that answers every request with `image`.
    #[must_use]
    pub fn new(image: Option<String>) -> Self {
        Self {
            image,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all requests received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<SceneRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SceneIllustrator for ScriptedIllustrator {
    async fn illustrate(&self, request: &SceneRequest) -> Result<Option<String>, NarrationError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.image.clone())
    }
}
