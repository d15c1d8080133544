//! Commands for the Session context.

use glacial_core::command::Command;
use glacial_world::domain::locations::LocationId;
use uuid::Uuid;

/// Command to start a new game session.
#[derive(Debug, Clone)]
pub struct StartSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for StartSession {
    fn command_type(&self) -> &'static str {
        "session.start_session"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to perform a free-text action.
#[derive(Debug, Clone)]
pub struct PerformAction {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session identifier.
    pub session_id: Uuid,
    /// What the player does, as typed.
    pub action: String,
}

impl Command for PerformAction {
    fn command_type(&self) -> &'static str {
        "session.perform_action"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to move to an adjacent location.
#[derive(Debug, Clone)]
pub struct Travel {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session identifier.
    pub session_id: Uuid,
    /// Where to go.
    pub destination: LocationId,
}

impl Command for Travel {
    fn command_type(&self) -> &'static str {
        "session.travel"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to paint the current scene.
#[derive(Debug, Clone)]
pub struct VisualizeScene {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session identifier.
    pub session_id: Uuid,
}

impl Command for VisualizeScene {
    fn command_type(&self) -> &'static str {
        "session.visualize_scene"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
