//! One live WebSocket connection
//!
//! A handle exists only for sessions that passed cookie verification at
//! the handshake, so it is authenticated for its whole lifetime and all
//! its fields are immutable. The registry owns it from registration
//! until cleanup.

use std::sync::Arc;
use std::time::Instant;

use relay_core::Snowflake;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::events::ServerEvent;

/// A single authenticated WebSocket connection
pub struct ConnectionHandle {
    /// Unique connection ID
    id: Uuid,

    /// The verified owner identity
    user_id: Snowflake,

    /// Bounded channel into the socket's send task
    sender: mpsc::Sender<ServerEvent>,

    /// Connection creation time
    created_at: Instant,
}

impl ConnectionHandle {
    /// Create a new handle for a verified user
    pub fn new(user_id: Snowflake, sender: mpsc::Sender<ServerEvent>) -> Arc<Self> {
        Arc::new(Self {
            id: Uuid::new_v4(),
            user_id,
            sender,
            created_at: Instant::now(),
        })
    }

    /// Get the connection ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Get the owning user's identity
    pub fn user_id(&self) -> Snowflake {
        self.user_id
    }

    /// Push an event toward the socket without blocking
    ///
    /// Delivery is best-effort: a full buffer drops the event (logged)
    /// so a slow client never stalls fan-out, and a closed channel means
    /// the socket is already gone.
    pub fn push(&self, event: ServerEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(
                    connection_id = %self.id,
                    user_id = %self.user_id,
                    "Outgoing buffer full, event dropped"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }

    /// Check if the socket side has gone away
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Get connection age
    pub fn age(&self) -> std::time::Duration {
        self.created_at.elapsed()
    }
}

impl std::fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .finish()
    }
}
