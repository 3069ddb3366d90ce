//! Domain errors - the relay's error taxonomy
//!
//! Four families matter to callers: validation, authorization, not-found,
//! and storage. Helper predicates let the outer layers map onto transport
//! status codes without matching every variant.

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // Not found
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Peer not found: {0}")]
    PeerNotFound(Snowflake),

    // Validation
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Message content is empty")]
    EmptyContent,

    #[error("Cannot send a message to yourself")]
    SelfMessage,

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    // Authorization
    #[error("Sender {claimed} does not match the authenticated user {authenticated}")]
    SenderMismatch {
        claimed: Snowflake,
        authenticated: Snowflake,
    },

    #[error("Action requires an authenticated connection")]
    Unauthenticated,

    // Conflict
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    // Storage
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Check if this is a not-found error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::PeerNotFound(_))
    }

    /// Check if this is a validation error
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::EmptyContent | Self::SelfMessage | Self::InvalidUsername(_)
        )
    }

    /// Check if this is an authorization error
    #[must_use]
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::SenderMismatch { .. } | Self::Unauthenticated)
    }

    /// Check if this is a conflict error
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::UsernameTaken(_))
    }

    /// Check if this is a storage error
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Stable error code for wire protocols
    #[must_use]
    pub fn code(&self) -> &'static str {
        if self.is_not_found() {
            "NOT_FOUND"
        } else if self.is_validation() {
            "VALIDATION_ERROR"
        } else if self.is_authorization() {
            "AUTHORIZATION_ERROR"
        } else if self.is_conflict() {
            "CONFLICT"
        } else {
            "STORAGE_ERROR"
        }
    }
}
