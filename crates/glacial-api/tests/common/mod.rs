//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use glacial_core::clock::Clock;
use glacial_core::rng::DeterministicRng;
use glacial_event_store::in_memory_event_repository::InMemoryEventRepository;
use glacial_narrative::application::narration::{Narrator, SceneIllustrator};
use glacial_test_support::{FixedClock, MockRng, ScriptedIllustrator, ScriptedNarrator};
use http_body_util::BodyExt;
use tower::ServiceExt;

use glacial_api::routes;
use glacial_api::state::AppState;

/// Narration every test session receives.
pub const NARRATION: &str = "Frost creeps along the ridge as you work.";

/// Image every test scene receives.
pub const IMAGE_URL: &str = "data:image/png;base64,iVBORw0KGgo=";

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock + Send + Sync> {
    Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()))
}

/// Build the full app router over a fresh in-memory event store, with
/// scripted narration and images and weather that never changes. Clone the
/// router to send several requests against the same store.
pub fn build_test_app() -> Router {
    build_test_app_with(
        MockRng,
        Arc::new(ScriptedNarrator::new(NARRATION)),
        Arc::new(ScriptedIllustrator::new(Some(IMAGE_URL.to_owned()))),
    )
}

/// Build the full app router with custom RNG and model doubles.
pub fn build_test_app_with(
    rng: impl DeterministicRng + Send + 'static,
    narrator: Arc<dyn Narrator>,
    illustrator: Arc<dyn SceneIllustrator>,
) -> Router {
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(rng));
    let app_state = AppState::new(
        fixed_clock(),
        rng,
        Arc::new(InMemoryEventRepository::new()),
        narrator,
        illustrator,
    );
    routes::app(app_state)
}

/// Send a POST request with an optional JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method("POST").uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Start a session and return its id.
pub async fn start_session(app: &Router) -> String {
    let (status, json) = post_json(app.clone(), "/api/v1/sessions", None).await;
    assert_eq!(status, StatusCode::OK);
    json["aggregate_id"].as_str().unwrap().to_owned()
}
