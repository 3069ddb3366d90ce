//! In-memory session store
//!
//! Maps an opaque credential (the value of the `session` cookie) to a
//! verified user identity. The relay consults `verify` at socket-connect
//! time and on every REST call; it never re-derives identity from
//! client-supplied fields.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand::RngCore;
use relay_core::Snowflake;

/// Token length in random bytes before encoding
const TOKEN_BYTES: usize = 32;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "session";

/// Session verification errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("unknown or malformed session token")]
    Invalid,

    #[error("session expired")]
    Expired,
}

/// A single issued session
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Check if the session is past its expiry
    #[inline]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Thread-safe store of issued session tokens
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a store whose sessions live for `ttl_seconds`
    #[must_use]
    pub fn new(ttl_seconds: i64) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl: Duration::seconds(ttl_seconds.max(1)),
        }
    }

    /// Issue a fresh token for the given user
    pub fn issue(&self, user_id: Snowflake) -> String {
        let token = Self::generate_token();
        let now = Utc::now();
        self.sessions.insert(
            token.clone(),
            Session {
                user_id,
                created_at: now,
                expires_at: now + self.ttl,
            },
        );
        tracing::debug!(user_id = %user_id, "Session issued");
        token
    }

    /// Resolve a token to its user identity
    ///
    /// Expired tokens are removed as a side effect.
    ///
    /// # Errors
    /// `SessionError::Invalid` for unknown tokens, `SessionError::Expired`
    /// for tokens past their TTL.
    pub fn verify(&self, token: &str) -> Result<Snowflake, SessionError> {
        let expired = match self.sessions.get(token) {
            Some(session) if !session.is_expired() => return Ok(session.user_id),
            Some(_) => true,
            None => false,
        };

        if expired {
            self.sessions.remove(token);
            return Err(SessionError::Expired);
        }
        Err(SessionError::Invalid)
    }

    /// Revoke a token. Returns false if it was not present.
    pub fn revoke(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Drop all expired sessions, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired());
        before - self.sessions.len()
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are held
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn generate_token() -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("sessions", &self.sessions.len())
            .finish()
    }
}
