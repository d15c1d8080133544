//! Routes for the Session bounded context.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use glacial_core::command::Command;
use glacial_core::error::DomainError;
use glacial_session::application::command_handlers::{self, SessionCommandResult};
use glacial_session::application::query_handlers::{self, GameSessionView};
use glacial_session::domain::commands;
use glacial_world::domain::locations::LocationId;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /{id}/actions.
#[derive(Debug, Deserialize)]
pub struct PerformActionRequest {
    /// What the player does, as typed.
    pub action: String,
}

/// Request body for POST /{id}/travel.
#[derive(Debug, Deserialize)]
pub struct TravelRequest {
    /// Identifier of the location to move to.
    pub destination: String,
}

/// Response body returned after a command is successfully handled.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// The session the command ran against.
    pub aggregate_id: Uuid,
    /// IDs of the domain events produced and persisted.
    pub event_ids: Vec<Uuid>,
}

impl From<SessionCommandResult> for CommandResponse {
    fn from(result: SessionCommandResult) -> Self {
        Self {
            aggregate_id: result.aggregate_id,
            event_ids: result.stored_events.iter().map(|e| e.event_id).collect(),
        }
    }
}

/// POST /
#[instrument(skip(state))]
async fn start_session(State(state): State<AppState>) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::StartSession {
        correlation_id: Uuid::new_v4(),
    };

    info!(
        correlation_id = %command.correlation_id,
        command_type = command.command_type(),
        "handling command"
    );

    let result = command_handlers::handle_start_session(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(result.into()))
}

/// GET /{id}
#[instrument(skip(state))]
async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<GameSessionView>, ApiError> {
    let view = query_handlers::get_session_by_id(session_id, &*state.event_repository).await?;
    Ok(Json(view))
}

/// POST /{id}/actions
#[instrument(skip(state, request))]
async fn perform_action(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<PerformActionRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::PerformAction {
        correlation_id: Uuid::new_v4(),
        session_id,
        action: request.action,
    };

    info!(
        correlation_id = %command.correlation_id,
        command_type = command.command_type(),
        "handling command"
    );

    let result = command_handlers::handle_perform_action(
        &command,
        state.clock.as_ref(),
        &state.rng,
        state.narrator.as_ref(),
        &state.in_flight,
        &*state.event_repository,
    )
    .await?;

    Ok(Json(result.into()))
}

/// POST /{id}/travel
#[instrument(skip(state, request), fields(destination = %request.destination))]
async fn travel(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<TravelRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let destination: LocationId = request.destination.parse().map_err(|_| {
        DomainError::Validation(format!("unknown destination: {}", request.destination))
    })?;

    let command = commands::Travel {
        correlation_id: Uuid::new_v4(),
        session_id,
        destination,
    };

    info!(
        correlation_id = %command.correlation_id,
        command_type = command.command_type(),
        "handling command"
    );

    let result = command_handlers::handle_travel(
        &command,
        state.clock.as_ref(),
        &state.rng,
        &state.in_flight,
        &*state.event_repository,
    )
    .await?;

    Ok(Json(result.into()))
}

/// POST /{id}/visualize
#[instrument(skip(state))]
async fn visualize_scene(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::VisualizeScene {
        correlation_id: Uuid::new_v4(),
        session_id,
    };

    info!(
        correlation_id = %command.correlation_id,
        command_type = command.command_type(),
        "handling command"
    );

    let result = command_handlers::handle_visualize_scene(
        &command,
        state.clock.as_ref(),
        state.illustrator.as_ref(),
        &state.in_flight,
        &*state.event_repository,
    )
    .await?;

    Ok(Json(result.into()))
}

/// Returns the router for the session context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(start_session))
        .route("/{id}", get(get_session))
        .route("/{id}/actions", post(perform_action))
        .route("/{id}/travel", post(travel))
        .route("/{id}/visualize", post(visualize_scene))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use glacial_core::clock::Clock;
    use glacial_core::repository::EventRepository;
    use glacial_core::rng::DeterministicRng;
    use glacial_test_support::{
        EmptyEventRepository, FailingEventRepository, FixedClock, MockRng,
        RecordingEventRepository, ScriptedIllustrator, ScriptedNarrator,
    };
    use serde_json::Value;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    fn app_state_with(event_repository: Arc<dyn EventRepository>) -> AppState {
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(FixedClock(Utc::now()));
        let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(MockRng));
        AppState::new(
            clock,
            rng,
            event_repository,
            Arc::new(ScriptedNarrator::new("The snow falls.")),
            Arc::new(ScriptedIllustrator::new(None)),
        )
    }

    fn post(uri: &str, body: Option<&Value>) -> Request<Body> {
        let builder = Request::builder().method("POST").uri(uri);
        match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    /// A repository already holding one started session.
    async fn started_repo() -> (Arc<RecordingEventRepository>, Uuid) {
        let repo = Arc::new(RecordingEventRepository::new(Vec::new()));
        let command = commands::StartSession {
            correlation_id: Uuid::new_v4(),
        };
        let result =
            command_handlers::handle_start_session(&command, &FixedClock(Utc::now()), repo.as_ref())
                .await
                .unwrap();
        (repo, result.aggregate_id)
    }

    #[tokio::test]
    async fn test_start_session_returns_200_with_event_ids() {
        // Arrange
        let app = router().with_state(app_state_with(Arc::new(EmptyEventRepository)));

        // Act
        let response = app.oneshot(post("/", None)).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        Uuid::parse_str(json["aggregate_id"].as_str().unwrap()).unwrap();
        let event_ids = json["event_ids"].as_array().unwrap();
        assert_eq!(event_ids.len(), 1);
    }

    #[tokio::test]
    async fn test_start_session_returns_500_when_repository_fails() {
        let app = router().with_state(app_state_with(Arc::new(FailingEventRepository)));

        let response = app.oneshot(post("/", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_body(response).await;
        assert_eq!(json["error"], "infrastructure_error");
    }

    #[tokio::test]
    async fn test_get_session_returns_404_for_unknown_id() {
        let app = router().with_state(app_state_with(Arc::new(EmptyEventRepository)));
        let request = Request::builder()
            .method("GET")
            .uri(format!("/{}", Uuid::new_v4()))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = json_body(response).await;
        assert_eq!(json["error"], "aggregate_not_found");
    }

    #[tokio::test]
    async fn test_get_session_returns_400_for_malformed_id() {
        let app = router().with_state(app_state_with(Arc::new(EmptyEventRepository)));
        let request = Request::builder()
            .method("GET")
            .uri("/not-a-uuid")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_perform_action_returns_200_with_event_ids() {
        // Arrange
        let (repo, session_id) = started_repo().await;
        let app = router().with_state(app_state_with(repo));
        let body = serde_json::json!({ "action": "Gather firewood" });

        // Act
        let response = app
            .oneshot(post(&format!("/{session_id}/actions"), Some(&body)))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["aggregate_id"], session_id.to_string());
        assert_eq!(json["event_ids"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_perform_action_returns_400_for_blank_action() {
        let (repo, session_id) = started_repo().await;
        let app = router().with_state(app_state_with(repo));
        let body = serde_json::json!({ "action": "   " });

        let response = app
            .oneshot(post(&format!("/{session_id}/actions"), Some(&body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_perform_action_returns_422_for_missing_field() {
        let app = router().with_state(app_state_with(Arc::new(EmptyEventRepository)));
        let body = serde_json::json!({});

        let response = app
            .oneshot(post(&format!("/{}/actions", Uuid::new_v4()), Some(&body)))
            .await
            .unwrap();

        // Axum returns 422 for deserialization failures.
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_travel_returns_400_for_unknown_destination() {
        let (repo, session_id) = started_repo().await;
        let app = router().with_state(app_state_with(repo));
        let body = serde_json::json!({ "destination": "atlantis" });

        let response = app
            .oneshot(post(&format!("/{session_id}/travel"), Some(&body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["message"], "unknown destination: atlantis");
    }

    #[tokio::test]
    async fn test_travel_returns_400_for_unreachable_destination() {
        let (repo, session_id) = started_repo().await;
        let app = router().with_state(app_state_with(repo));
        let body = serde_json::json!({ "destination": "frozen_lake" });

        let response = app
            .oneshot(post(&format!("/{session_id}/travel"), Some(&body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["message"], "You cannot reach that location from here.");
    }

    #[tokio::test]
    async fn test_action_on_busy_session_returns_409() {
        // Arrange
        let (repo, session_id) = started_repo().await;
        let state = app_state_with(repo.clone());
        let _held = state.in_flight.claim(session_id).unwrap();
        let app = router().with_state(state.clone());
        let body = serde_json::json!({ "action": "Gather firewood" });

        // Act
        let response = app
            .oneshot(post(&format!("/{session_id}/actions"), Some(&body)))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = json_body(response).await;
        assert_eq!(json["error"], "concurrency_conflict");
        assert_eq!(repo.appended_events().len(), 1);
    }

    #[tokio::test]
    async fn test_visualize_without_image_returns_no_events() {
        let (repo, session_id) = started_repo().await;
        let app = router().with_state(app_state_with(repo));

        let response = app
            .oneshot(post(&format!("/{session_id}/visualize"), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert!(json["event_ids"].as_array().unwrap().is_empty());
    }
}
