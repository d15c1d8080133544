//! The narrative log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who a log entry speaks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRole {
    /// The world itself: arrivals, weather, the opening line.
    System,
    /// The player's own action.
    User,
    /// Narration and scene images.
    Ai,
}

impl LogRole {
    /// Label shown next to the entry.
    #[must_use]
    pub const fn display_label(self) -> &'static str {
        match self {
            Self::User => "Struggler",
            Self::System => "Environment",
            Self::Ai => "The Wild",
        }
    }
}

/// One entry of the append-only narrative log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameLog {
    /// Speaker.
    pub role: LogRole,
    /// Text of the entry.
    pub message: String,
    /// When the entry was written.
    pub timestamp: DateTime<Utc>,
    /// Scene image as a `data:` URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl GameLog {
    pub(crate) fn new(role: LogRole, message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role,
            message: message.into(),
            timestamp,
            image_url: None,
        }
    }
}
