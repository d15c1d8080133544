//! Narrator and illustrator ports, with the fallbacks the game relies on.

use async_trait::async_trait;
use tracing::warn;

use crate::domain::prompts::{NarrationRequest, SceneRequest};
use crate::error::NarrationError;

/// Narration used when the model answers with no text.
pub const SILENT_NARRATION: &str =
    "The wind howls, and the ice crackles beneath your feet, but nothing else happens.";

/// Narration used when the model cannot be reached.
pub const UNAVAILABLE_NARRATION: &str =
    "The bitter cold freezes your thoughts. (Check your API Key or connection)";

/// Produces narration text for a player action.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Asks the model to narrate `request`. May return empty text.
    async fn narrate(&self, request: &NarrationRequest) -> Result<String, NarrationError>;
}

/// Produces an image of the current scene.
#[async_trait]
pub trait SceneIllustrator: Send + Sync {
    /// Asks the model to paint `request`. Returns a `data:` URL, or `None`
    /// when the model sent back no image.
    async fn illustrate(&self, request: &SceneRequest) -> Result<Option<String>, NarrationError>;
}

/// Narrates `request`, substituting a fixed line on failure or silence.
pub async fn narrate_or_fallback(narrator: &dyn Narrator, request: &NarrationRequest) -> String {
    match narrator.narrate(request).await {
        Ok(text) if text.trim().is_empty() => SILENT_NARRATION.to_owned(),
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err, "narration failed, using fallback");
            UNAVAILABLE_NARRATION.to_owned()
        }
    }
}

/// Illustrates `request`, treating any failure as "no image".
pub async fn illustrate_or_none(
    illustrator: &dyn SceneIllustrator,
    request: &SceneRequest,
) -> Option<String> {
    match illustrator.illustrate(request).await {
        Ok(image) => image,
        Err(err) => {
            warn!(error = %err, "scene illustration failed");
            None
        }
    }
}
