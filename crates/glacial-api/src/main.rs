//! Glacial Frontier API server entry point.

use std::error::Error;
use std::sync::{Arc, Mutex};

use glacial_api::config::AppConfig;
use glacial_api::state::AppState;
use glacial_api::{routes, telemetry};
use glacial_core::clock::{Clock, SystemClock};
use glacial_core::rng::{DeterministicRng, SystemRng};
use glacial_event_store::in_memory_event_repository::InMemoryEventRepository;
use glacial_narrative::infrastructure::gemini::GeminiClient;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Read configuration from environment.
    let config = AppConfig::from_env()?;

    // Initialize tracing subscriber.
    let provider = telemetry::init(config.otlp_endpoint.as_deref())?;

    tracing::info!(
        text_model = %config.gemini.text_model,
        image_model = %config.gemini.image_model,
        otlp = config.otlp_endpoint.is_some(),
        "Starting Glacial Frontier API server"
    );
    if config.gemini.api_key.is_empty() {
        tracing::warn!("GEMINI_API_KEY is not set; narration will fall back to fixed lines");
    }

    // Build application state.
    let gemini = Arc::new(GeminiClient::new(config.gemini.clone())?);
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(SystemClock);
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(SystemRng::new()));
    let app_state = AppState::new(
        clock,
        rng,
        Arc::new(InMemoryEventRepository::new()),
        gemini.clone(),
        gemini,
    );

    // TODO: Replace CorsLayer::permissive() with the front end's origin once it is hosted.
    let app = routes::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server.
    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    telemetry::shutdown(provider);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
