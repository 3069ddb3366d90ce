//! Repository traits (ports) - the interface the domain needs from storage
//!
//! The domain defines what it needs; the infrastructure layer provides the
//! implementation. Test code substitutes in-memory fakes.

use async_trait::async_trait;

use crate::entities::{Message, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Check if a username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Create a new user with its password hash
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get the password hash for credential verification
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

/// The durable, append-only message log
///
/// `append` must not return before the message is durable; `history` is the
/// restartable, deterministically ordered view of one conversation pair.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persist a message. Durability is required before returning.
    async fn append(&self, message: &Message) -> RepoResult<()>;

    /// All messages of the unordered pair `{a, b}`, ascending by
    /// `(created_at, id)`.
    async fn history(&self, a: Snowflake, b: Snowflake) -> RepoResult<Vec<Message>>;
}
