//! Message service
//!
//! Handles sending, replying, forwarding, deleting and listing messages.

use messenger_core::entities::{Message, MessageBody, User};
use messenger_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::MessageResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Send a text message
    #[instrument(skip(self, text))]
    pub async fn send_text(
        &self,
        conversation_id: Snowflake,
        sender_id: Snowflake,
        text: &str,
    ) -> ServiceResult<MessageResponse> {
        self.post(conversation_id, sender_id, MessageBody::Text(text.to_string()), None)
            .await
    }

    /// Send an image by reference
    #[instrument(skip(self))]
    pub async fn send_image(
        &self,
        conversation_id: Snowflake,
        sender_id: Snowflake,
        image_url: &str,
    ) -> ServiceResult<MessageResponse> {
        self.post(conversation_id, sender_id, MessageBody::Image(image_url.to_string()), None)
            .await
    }

    /// Reply to a message of the same conversation
    #[instrument(skip(self, text))]
    pub async fn reply(
        &self,
        conversation_id: Snowflake,
        sender_id: Snowflake,
        text: &str,
        parent_id: Snowflake,
    ) -> ServiceResult<MessageResponse> {
        self.post(
            conversation_id,
            sender_id,
            MessageBody::Text(text.to_string()),
            Some(parent_id),
        )
        .await
    }

    /// Copy a message into another conversation the user takes part in
    #[instrument(skip(self))]
    pub async fn forward(
        &self,
        original_id: Snowflake,
        target_conversation_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<MessageResponse> {
        let forwarder = self.sender(user_id).await?;
        let new_id = self.ctx.generate_id();

        let message = self
            .ctx
            .message_repo()
            .forward(original_id, new_id, target_conversation_id, forwarder.id)
            .await?;

        info!(
            message_id = %message.id,
            original_id = %original_id,
            conversation_id = %target_conversation_id,
            "Message forwarded"
        );

        Ok(MessageResponse::from(message))
    }

    /// Delete a message; only its sender may do so
    #[instrument(skip(self))]
    pub async fn delete(&self, message_id: Snowflake, requester_id: Snowflake) -> ServiceResult<()> {
        let message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or(DomainError::MessageNotFound(message_id))?;

        if message.sender_id != requester_id {
            warn!(
                message_id = %message_id,
                requester_id = %requester_id,
                "Rejected delete by non-sender"
            );
            return Err(DomainError::NotMessageSender.into());
        }

        self.ctx.message_repo().delete(message_id).await?;

        info!(
            message_id = %message_id,
            conversation_id = %message.conversation_id,
            "Message deleted"
        );

        Ok(())
    }

    /// Get a single message with its reactions
    #[instrument(skip(self))]
    pub async fn get_message(&self, message_id: Snowflake) -> ServiceResult<MessageResponse> {
        let message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Message", message_id))?;

        let reactions = self.ctx.reaction_repo().find_by_message(message_id).await?;

        Ok(MessageResponse::with_reactions(message, &reactions))
    }

    /// All messages of a conversation, oldest first
    #[instrument(skip(self))]
    pub async fn list_messages(
        &self,
        conversation_id: Snowflake,
    ) -> ServiceResult<Vec<MessageResponse>> {
        let messages = self
            .ctx
            .message_repo()
            .find_by_conversation(conversation_id)
            .await?;

        Ok(messages.into_iter().map(MessageResponse::from).collect())
    }

    async fn post(
        &self,
        conversation_id: Snowflake,
        sender_id: Snowflake,
        body: MessageBody,
        reply_to: Option<Snowflake>,
    ) -> ServiceResult<MessageResponse> {
        let sender = self.sender(sender_id).await?;
        let id = self.ctx.generate_id();

        let message = match reply_to {
            Some(parent_id) => {
                Message::new_reply(id, conversation_id, sender.id, sender.username, body, parent_id)
            }
            None => Message::new(id, conversation_id, sender.id, sender.username, body),
        };

        let stored = self.ctx.message_repo().create(&message).await?;

        info!(
            message_id = %stored.id,
            conversation_id = %conversation_id,
            reply = stored.is_reply(),
            image = stored.body.is_image(),
            "Message sent"
        );

        Ok(MessageResponse::from(stored))
    }

    async fn sender(&self, user_id: Snowflake) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }
}
