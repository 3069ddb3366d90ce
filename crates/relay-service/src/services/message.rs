//! Message service - validated persistence and conversation history

use relay_core::{DomainError, Message, Snowflake};
use tracing::{debug, instrument};

use crate::dto::MessageResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new message service
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Validate and durably persist one message
    ///
    /// The message is durable when this returns; fan-out to live
    /// connections happens afterwards, never before.
    #[instrument(skip(self, content), fields(sender = %sender_id, receiver = %receiver_id))]
    pub async fn send(
        &self,
        sender_id: Snowflake,
        receiver_id: Snowflake,
        content: String,
    ) -> ServiceResult<MessageResponse> {
        if content.trim().is_empty() {
            return Err(DomainError::EmptyContent.into());
        }

        if sender_id == receiver_id {
            return Err(DomainError::SelfMessage.into());
        }

        if self.ctx.user_repo().find_by_id(receiver_id).await?.is_none() {
            return Err(DomainError::PeerNotFound(receiver_id).into());
        }

        let message = Message::new(self.ctx.generate_id(), sender_id, receiver_id, content);
        self.ctx.message_repo().append(&message).await?;

        debug!(message_id = %message.id, "Message persisted");
        Ok(MessageResponse::from(message))
    }

    /// Full conversation history between a user and a peer, oldest first
    #[instrument(skip(self), fields(user = %user_id, peer = %peer_id))]
    pub async fn history(
        &self,
        user_id: Snowflake,
        peer_id: Snowflake,
    ) -> ServiceResult<Vec<MessageResponse>> {
        if self.ctx.user_repo().find_by_id(peer_id).await?.is_none() {
            return Err(DomainError::PeerNotFound(peer_id).into());
        }

        let messages = self.ctx.message_repo().history(user_id, peer_id).await?;
        Ok(messages.iter().map(MessageResponse::from).collect())
    }
}
