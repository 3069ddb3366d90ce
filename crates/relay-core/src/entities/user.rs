//! User entity - a registered account identity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User entity
///
/// The identity is opaque and never reused; the password hash is not part
/// of the entity and stays inside the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User
    pub fn new(id: Snowflake, username: String) -> Self {
        Self {
            id,
            username,
            created_at: Utc::now(),
        }
    }
}
