//! User database model

use chrono::{DateTime, Utc};
use relay_core::{Snowflake, User};
use sqlx::FromRow;

/// Database model for the users table
///
/// The password hash stays in this layer; the domain entity never carries
/// it.
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        Self {
            id: Snowflake::new(model.id),
            username: model.username,
            created_at: model.created_at,
        }
    }
}
