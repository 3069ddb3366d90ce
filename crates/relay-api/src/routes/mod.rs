//! Route definitions
//!
//! REST endpoints under /api, the WebSocket endpoint at /ws, and the
//! health probe at /health.

use axum::{
    routing::{get, post},
    Router,
};
use relay_gateway::ws_handler;

use crate::handlers::{auth, health, messages, users};
use crate::state::AppState;

/// Create the main router with the API and WebSocket routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws", get(ws_handler))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}

/// REST routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/users", get(users::get_active_users))
        .route("/messages/:peer_id", get(messages::get_history))
}
