//! Route modules organized by bounded context.

use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod session;
pub mod world;

/// Assembles every context router under its public prefix.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api/v1/sessions", session::router())
        .nest("/api/v1/world", world::router())
        .with_state(state)
}
