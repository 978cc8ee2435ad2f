//! SQLite implementation of MessageRepository

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::instrument;

use messenger_core::entities::{Message, MessageBody, MessageWithReactions};
use messenger_core::error::DomainError;
use messenger_core::traits::{MessageRepository, RepoResult};
use messenger_core::validation::{validate_image_ref, validate_text};
use messenger_core::value_objects::Snowflake;

use crate::mappers::group_reactions;
use crate::models::MessageReactionModel;

use super::error::{conversation_not_found, map_db_error, message_not_found, not_participant};
use super::lookups::{
    conversation_exists, fetch_message, insert_message, is_participant, refresh_preview,
};

/// SQLite implementation of MessageRepository
#[derive(Clone)]
pub struct SqliteMessageRepository {
    pool: SqlitePool,
}

impl SqliteMessageRepository {
    /// Create a new SqliteMessageRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn validate_body(body: &MessageBody) -> RepoResult<()> {
    match body {
        MessageBody::Text(text) => validate_text(text),
        MessageBody::Image(url) => validate_image_ref(url),
    }
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        fetch_message(&mut conn, id).await
    }

    #[instrument(skip(self))]
    async fn find_by_conversation(
        &self,
        conversation_id: Snowflake,
    ) -> RepoResult<Vec<MessageWithReactions>> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;

        if !conversation_exists(&mut conn, conversation_id).await? {
            return Err(conversation_not_found(conversation_id));
        }

        let rows = sqlx::query_as::<_, MessageReactionModel>(
            r"
            SELECT m.id, m.conversation_id, m.sender_id, u.username AS sender,
                   m.content, m.image_url, m.reply_to, m.created_at,
                   r.user_id AS reaction_user_id,
                   r.emoji AS reaction_emoji,
                   r.created_at AS reaction_created_at
            FROM messages m
            JOIN users u ON u.id = m.sender_id
            LEFT JOIN reactions r ON r.message_id = m.id
            WHERE m.conversation_id = ?1
            ORDER BY m.created_at, m.id, r.created_at, r.user_id
            ",
        )
        .bind(conversation_id.into_inner())
        .fetch_all(&mut *conn)
        .await
        .map_err(map_db_error)?;

        Ok(group_reactions(rows))
    }

    #[instrument(skip(self, message), fields(message_id = %message.id, conversation_id = %message.conversation_id))]
    async fn create(&self, message: &Message) -> RepoResult<Message> {
        validate_body(&message.body)?;

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        if !conversation_exists(&mut tx, message.conversation_id).await? {
            return Err(conversation_not_found(message.conversation_id));
        }

        if !is_participant(&mut tx, message.conversation_id, message.sender_id).await? {
            return Err(not_participant(message.conversation_id, message.sender_id));
        }

        if let Some(parent_id) = message.reply_to {
            let parent_conversation = sqlx::query_scalar::<_, i64>(
                "SELECT conversation_id FROM messages WHERE id = ?1",
            )
            .bind(parent_id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;

            if parent_conversation != Some(message.conversation_id.into_inner()) {
                return Err(DomainError::InvalidReplyTarget(parent_id));
            }
        }

        insert_message(&mut tx, message).await?;
        let stored = fetch_message(&mut tx, message.id)
            .await?
            .ok_or_else(|| message_not_found(message.id))?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn forward(
        &self,
        original_id: Snowflake,
        new_id: Snowflake,
        target_conversation_id: Snowflake,
        sender_id: Snowflake,
    ) -> RepoResult<Message> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let original = fetch_message(&mut tx, original_id)
            .await?
            .ok_or_else(|| message_not_found(original_id))?;

        if !conversation_exists(&mut tx, target_conversation_id).await? {
            return Err(conversation_not_found(target_conversation_id));
        }

        if !is_participant(&mut tx, target_conversation_id, sender_id).await? {
            return Err(not_participant(target_conversation_id, sender_id));
        }

        // Sender name is resolved when the copy is read back
        let copy = original.forwarded(new_id, target_conversation_id, sender_id, String::new());
        insert_message(&mut tx, &copy).await?;
        let stored = fetch_message(&mut tx, new_id)
            .await?
            .ok_or_else(|| message_not_found(new_id))?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let conversation_id = sqlx::query_scalar::<_, i64>(
            "SELECT conversation_id FROM messages WHERE id = ?1",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .map(Snowflake::new)
        .ok_or_else(|| message_not_found(id))?;

        // Reactions go with the message (ON DELETE CASCADE)
        sqlx::query("DELETE FROM messages WHERE id = ?1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        refresh_preview(&mut tx, conversation_id).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
