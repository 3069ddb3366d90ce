//! Message entity - one point-to-point chat message

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Message entity
///
/// Immutable once created: no edit or delete exists in the relay. A
/// conversation is the set of messages sharing the same unordered
/// `{sender_id, receiver_id}` pair, regardless of direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub sender_id: Snowflake,
    pub receiver_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new Message
    pub fn new(
        id: Snowflake,
        sender_id: Snowflake,
        receiver_id: Snowflake,
        content: String,
    ) -> Self {
        Self {
            id,
            sender_id,
            receiver_id,
            content,
            created_at: Utc::now(),
        }
    }

    /// The unordered conversation pair, normalized (smaller ID first)
    pub fn pair(&self) -> (Snowflake, Snowflake) {
        if self.sender_id <= self.receiver_id {
            (self.sender_id, self.receiver_id)
        } else {
            (self.receiver_id, self.sender_id)
        }
    }

    /// Whether the given user is the sender or the receiver
    #[inline]
    pub fn involves(&self, user_id: Snowflake) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }

    /// Check if the content is empty after trimming
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}
