//! PostgreSQL implementation of MessageRepository
//!
//! This is the durable half of the Message Store. `append` is the
//! serialization point for a conversation: the INSERT is awaited before
//! returning, so a success means the message survived.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use relay_core::entities::Message;
use relay_core::traits::{MessageRepository, RepoResult};
use relay_core::value_objects::Snowflake;

use crate::models::MessageModel;

use super::error::map_db_error;

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn append(&self, message: &Message) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, sender_id, receiver_id, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(message.id.into_inner())
        .bind(message.sender_id.into_inner())
        .bind(message.receiver_id.into_inner())
        .bind(&message.content)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn history(&self, a: Snowflake, b: Snowflake) -> RepoResult<Vec<Message>> {
        // Pair-normalized match, phrased to hit idx_messages_pair;
        // (created_at, id) gives a deterministic total order even when
        // timestamps collide.
        let results = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, sender_id, receiver_id, content, created_at
            FROM messages
            WHERE LEAST(sender_id, receiver_id) = LEAST($1, $2)
              AND GREATEST(sender_id, receiver_id) = GREATEST($1, $2)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(a.into_inner())
        .bind(b.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }
}
