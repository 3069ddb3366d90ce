//! # relay-core
//!
//! Domain layer for the message relay: identities, entities, errors,
//! and the repository ports the infrastructure layer implements.

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Message, User};
pub use error::DomainError;
pub use traits::{MessageRepository, RepoResult, UserRepository};
pub use value_objects::{Snowflake, SnowflakeGenerator};
