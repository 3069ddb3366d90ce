//! Service context - dependency container for services
//!
//! Repositories are trait objects so tests can substitute in-memory
//! implementations for the PostgreSQL ones.

use std::sync::Arc;

use relay_common::SessionStore;
use relay_core::traits::{MessageRepository, UserRepository};
use relay_core::SnowflakeGenerator;

/// Service context containing all shared dependencies
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    message_repo: Arc<dyn MessageRepository>,
    sessions: Arc<SessionStore>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        message_repo: Arc<dyn MessageRepository>,
        sessions: Arc<SessionStore>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            user_repo,
            message_repo,
            sessions,
            snowflake_generator,
        }
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the session store
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Generate a new unique ID
    pub fn generate_id(&self) -> relay_core::Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("sessions", &self.sessions)
            .finish()
    }
}

/// Builder for `ServiceContext`
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    sessions: Option<Arc<SessionStore>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user repository
    #[must_use]
    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    /// Set the message repository
    #[must_use]
    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    /// Set the session store
    #[must_use]
    pub fn sessions(mut self, sessions: Arc<SessionStore>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    /// Set the snowflake generator
    #[must_use]
    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the context
    ///
    /// # Errors
    /// Returns the name of the first missing dependency.
    pub fn build(self) -> Result<ServiceContext, &'static str> {
        Ok(ServiceContext {
            user_repo: self.user_repo.ok_or("user_repo is required")?,
            message_repo: self.message_repo.ok_or("message_repo is required")?,
            sessions: self.sessions.ok_or("sessions is required")?,
            snowflake_generator: self
                .snowflake_generator
                .ok_or("snowflake_generator is required")?,
        })
    }
}
