//! Reaction service
//!
//! Handles message reactions (add, remove, query). A user holds at most one
//! reaction per message.

use messenger_core::entities::Reaction;
use messenger_core::validation::validate_reaction;
use messenger_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::ReactionResponse;

use super::context::ServiceContext;
use super::conversation::ConversationService;
use super::error::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add reaction to a message, replacing the user's previous one
    #[instrument(skip(self))]
    pub async fn add_reaction(
        &self,
        message_id: Snowflake,
        user_id: Snowflake,
        emoji: &str,
    ) -> ServiceResult<ReactionResponse> {
        validate_reaction(emoji)?;

        let message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or(DomainError::MessageNotFound(message_id))?;

        ConversationService::new(self.ctx)
            .require_participant(message.conversation_id, user_id)
            .await?;

        let reaction = Reaction::new(message_id, user_id, emoji.to_string());
        self.ctx.reaction_repo().upsert(&reaction).await?;

        info!(
            message_id = %message_id,
            user_id = %user_id,
            emoji = %emoji,
            "Reaction added"
        );

        Ok(ReactionResponse::from(reaction))
    }

    /// Remove the user's reaction from a message
    ///
    /// Fails with `ReactionNotFound` when there was nothing to remove.
    #[instrument(skip(self))]
    pub async fn remove_reaction(
        &self,
        message_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        self.ctx.reaction_repo().delete(message_id, user_id).await?;

        info!(message_id = %message_id, user_id = %user_id, "Reaction removed");

        Ok(())
    }

    /// Get all reactions for a message
    #[instrument(skip(self))]
    pub async fn list_reactions(&self, message_id: Snowflake) -> ServiceResult<Vec<ReactionResponse>> {
        if self.ctx.message_repo().find_by_id(message_id).await?.is_none() {
            return Err(DomainError::MessageNotFound(message_id).into());
        }

        let reactions = self.ctx.reaction_repo().find_by_message(message_id).await?;

        Ok(reactions.into_iter().map(ReactionResponse::from).collect())
    }
}
