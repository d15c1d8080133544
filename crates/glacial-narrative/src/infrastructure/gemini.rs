//! Gemini REST client for narration text and scene images.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::narration::{Narrator, SceneIllustrator};
use crate::domain::prompts::{
    NARRATION_TEMPERATURE, NARRATOR_SYSTEM_INSTRUCTION, NarrationRequest, SCENE_ASPECT_RATIO,
    SceneRequest,
};
use crate::error::NarrationError;

/// Public Gemini endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Model used for narration.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";
/// Model used for scene images.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`GeminiClient`].
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key sent as `x-goog-api-key`.
    pub api_key: String,
    /// Base URL up to and including the API version.
    pub base_url: String,
    /// Model for narration.
    pub text_model: String,
    /// Model for scene images.
    pub image_model: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Default settings with the given key.
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            text_model: DEFAULT_TEXT_MODEL.to_owned(),
            image_model: DEFAULT_IMAGE_MODEL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<TextPart<'a>>,
}

impl<'a> Content<'a> {
    fn text(text: &'a str) -> Self {
        Self {
            parts: vec![TextPart { text }],
        }
    }
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig<'a> {
    aspect_ratio: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &ResponsePart> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|c| c.parts.iter())
    }

    /// Concatenated text of the first candidate.
    fn text(&self) -> String {
        self.parts().filter_map(|p| p.text.as_deref()).collect()
    }

    /// First inline image of the first candidate, as a `data:` URL.
    fn image_data_url(&self) -> Option<String> {
        self.parts()
            .find_map(|p| p.inline_data.as_ref())
            .map(|d| format!("data:{};base64,{}", d.mime_type, d.data))
    }
}

/// HTTP client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Builds a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `NarrationError::Transport` if the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, NarrationError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    async fn generate(
        &self,
        model: &str,
        body: &GenerateContentRequest<'_>,
    ) -> Result<GenerateContentResponse, NarrationError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        );
        debug!(%model, "calling generateContent");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(NarrationError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl Narrator for GeminiClient {
    async fn narrate(&self, request: &NarrationRequest) -> Result<String, NarrationError> {
        let prompt = request.prompt();
        let body = GenerateContentRequest {
            contents: vec![Content::text(&prompt)],
            system_instruction: Some(Content::text(NARRATOR_SYSTEM_INSTRUCTION)),
            generation_config: Some(GenerationConfig {
                temperature: Some(NARRATION_TEMPERATURE),
                ..GenerationConfig::default()
            }),
        };

        let response = self.generate(&self.config.text_model, &body).await?;
        Ok(response.text())
    }
}

#[async_trait]
impl SceneIllustrator for GeminiClient {
    async fn illustrate(&self, request: &SceneRequest) -> Result<Option<String>, NarrationError> {
        let prompt = request.prompt();
        let body = GenerateContentRequest {
            contents: vec![Content::text(&prompt)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: SCENE_ASPECT_RATIO,
                }),
                ..GenerationConfig::default()
            }),
        };

        let response = self.generate(&self.config.image_model, &body).await?;
        Ok(response.image_data_url())
    }
}
