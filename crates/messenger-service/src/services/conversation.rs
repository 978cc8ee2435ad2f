//! Conversation service
//!
//! Handles direct conversation creation and conversation lookups for both kinds.

use messenger_core::entities::Conversation;
use messenger_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{ConversationDetailResponse, ConversationResponse, ConversationSummaryResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Conversation service
pub struct ConversationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConversationService<'a> {
    /// Create a new ConversationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Start a direct conversation with the user named `other`
    ///
    /// A new conversation is created on every call, even when the pair
    /// already has one.
    #[instrument(skip(self))]
    pub async fn create_direct(&self, initiator: Snowflake, other: &str) -> ServiceResult<Snowflake> {
        let conversation = Conversation::new_direct(self.ctx.generate_id());

        self.ctx
            .conversation_repo()
            .create_direct(&conversation, initiator, other)
            .await?;

        info!(
            conversation_id = %conversation.id,
            initiator = %initiator,
            other = %other,
            "Direct conversation created"
        );

        Ok(conversation.id)
    }

    /// List every conversation of a user, most recently active first
    #[instrument(skip(self))]
    pub async fn list_for_user(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<ConversationSummaryResponse>> {
        if self.ctx.user_repo().find_by_id(user_id).await?.is_none() {
            return Err(DomainError::UserNotFound(user_id).into());
        }

        let summaries = self.ctx.conversation_repo().list_for_user(user_id).await?;

        Ok(summaries
            .into_iter()
            .map(ConversationSummaryResponse::from)
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn is_participant(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<bool> {
        Ok(self
            .ctx
            .conversation_repo()
            .is_participant(conversation_id, user_id)
            .await?)
    }

    /// Fail with `NotParticipant` unless the user belongs to the conversation
    pub async fn require_participant(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        if self.is_participant(conversation_id, user_id).await? {
            return Ok(());
        }

        warn!(
            conversation_id = %conversation_id,
            user_id = %user_id,
            "Rejected non-participant"
        );
        Err(DomainError::NotParticipant.into())
    }

    /// Kind, participants and group attributes of a conversation
    #[instrument(skip(self))]
    pub async fn get_detail(
        &self,
        conversation_id: Snowflake,
    ) -> ServiceResult<ConversationDetailResponse> {
        let detail = self.ctx.conversation_repo().detail(conversation_id).await?;
        Ok(ConversationDetailResponse::from(detail))
    }

    /// Conversation row including its cached preview
    #[instrument(skip(self))]
    pub async fn get_conversation(
        &self,
        conversation_id: Snowflake,
    ) -> ServiceResult<ConversationResponse> {
        let conversation = self
            .ctx
            .conversation_repo()
            .find_by_id(conversation_id)
            .await?
            .ok_or(DomainError::ConversationNotFound(conversation_id))?;

        Ok(ConversationResponse::from(conversation))
    }
}
