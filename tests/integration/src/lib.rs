//! Integration test utilities for the relay server
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API and the WebSocket relay.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
