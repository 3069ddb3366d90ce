//! Error handling utilities for repositories

use relay_core::DomainError;
use sqlx::Error as SqlxError;

/// Convert a SQLx error to the domain storage error
///
/// Storage failures must surface, never silently drop writes.
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::Storage(e.to_string())
}

/// Check for unique violation and return the given error, otherwise a
/// storage error
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::Storage(e.to_string())
}
