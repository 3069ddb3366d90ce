//! # relay-api
//!
//! REST and WebSocket server built on Axum. Mounts the auth/session
//! boundary under `/api` and the relay's `/ws` endpoint on the same
//! listener, matching the single-process shape of the client's server.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
