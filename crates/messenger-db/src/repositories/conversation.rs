//! SQLite implementation of ConversationRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::instrument;

use messenger_core::entities::{Conversation, ConversationDetail, ConversationSummary};
use messenger_core::error::DomainError;
use messenger_core::traits::{ConversationRepository, RepoResult};
use messenger_core::value_objects::Snowflake;

use crate::mappers::{summary_from_row, ConversationInsert};
use crate::models::{ConversationListModel, ConversationModel, ParticipantModel};

use super::error::{conversation_not_found, map_db_error, user_not_found};
use super::lookups::{
    add_participant, participant_usernames, user_exists, user_id_by_username,
};

/// SQLite implementation of ConversationRepository
#[derive(Clone)]
pub struct SqliteConversationRepository {
    pool: SqlitePool,
}

impl SqliteConversationRepository {
    /// Create a new SqliteConversationRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for SqliteConversationRepository {
    #[instrument(skip(self, conversation), fields(conversation_id = %conversation.id))]
    async fn create_direct(
        &self,
        conversation: &Conversation,
        initiator: Snowflake,
        other: &str,
    ) -> RepoResult<()> {
        if conversation.is_group() {
            return Err(DomainError::ValidationError(
                "expected a direct conversation".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        if !user_exists(&mut tx, initiator).await? {
            return Err(user_not_found(initiator));
        }

        let other_id = user_id_by_username(&mut tx, other)
            .await?
            .ok_or_else(|| DomainError::UnknownParticipant(other.to_string()))?;

        if other_id == initiator {
            return Err(DomainError::ValidationError(
                "cannot start a conversation with yourself".to_string(),
            ));
        }

        let insert = ConversationInsert::new(conversation);
        sqlx::query(
            r"
            INSERT INTO conversations (id, kind, name, photo_url, last_message, last_activity_at, created_at)
            VALUES (?1, ?2, ?3, ?4, '', ?5, ?5)
            ",
        )
        .bind(insert.id)
        .bind(insert.kind)
        .bind(insert.name)
        .bind(insert.photo_url)
        .bind(insert.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        add_participant(&mut tx, conversation.id, initiator, insert.created_at).await?;
        add_participant(&mut tx, conversation.id, other_id, insert.created_at).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Conversation>> {
        let result = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT id, kind, name, photo_url, last_message, last_activity_at, created_at
            FROM conversations
            WHERE id = ?1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Conversation::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<ConversationSummary>> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;

        // Latest message per conversation. Activity shares millisecond
        // timestamps, so ties fall back to the id of the activity itself.
        let rows = sqlx::query_as::<_, ConversationListModel>(
            r"
            SELECT c.id, c.kind, c.name, c.photo_url, c.created_at,
                   lm.content AS latest_content,
                   lm.image_url AS latest_image_url,
                   lm.created_at AS latest_created_at,
                   other.username AS other_username,
                   other.photo_url AS other_photo_url
            FROM conversation_participants me
            JOIN conversations c ON c.id = me.conversation_id
            LEFT JOIN messages lm ON lm.id = (
                SELECT m.id FROM messages m
                WHERE m.conversation_id = c.id
                ORDER BY m.created_at DESC, m.id DESC
                LIMIT 1
            )
            LEFT JOIN conversation_participants op
                ON c.kind = 'direct' AND op.conversation_id = c.id AND op.user_id <> me.user_id
            LEFT JOIN users other ON other.id = op.user_id
            WHERE me.user_id = ?1
            ORDER BY COALESCE(lm.created_at, c.created_at) DESC, COALESCE(lm.id, c.id) DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&mut *conn)
        .await
        .map_err(map_db_error)?;

        let participants = sqlx::query_as::<_, ParticipantModel>(
            r"
            SELECT cp.conversation_id, u.username
            FROM conversation_participants cp
            JOIN users u ON u.id = cp.user_id
            WHERE cp.conversation_id IN (
                SELECT conversation_id FROM conversation_participants WHERE user_id = ?1
            )
            ORDER BY cp.conversation_id, cp.joined_at, cp.rowid
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&mut *conn)
        .await
        .map_err(map_db_error)?;

        let mut by_conversation: HashMap<i64, Vec<String>> = HashMap::new();
        for p in participants {
            by_conversation
                .entry(p.conversation_id)
                .or_default()
                .push(p.username);
        }

        rows.into_iter()
            .map(|row| {
                let names = by_conversation.remove(&row.id).unwrap_or_default();
                summary_from_row(row, names)
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn is_participant(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<bool> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        super::lookups::is_participant(&mut conn, conversation_id, user_id).await
    }

    #[instrument(skip(self))]
    async fn detail(&self, id: Snowflake) -> RepoResult<ConversationDetail> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;

        let conversation = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT id, kind, name, photo_url, last_message, last_activity_at, created_at
            FROM conversations
            WHERE id = ?1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| conversation_not_found(id))
        .and_then(Conversation::try_from)?;

        let participants = participant_usernames(&mut conn, id).await?;

        Ok(ConversationDetail {
            id: conversation.id,
            kind: conversation.kind,
            participants,
            name: conversation.name,
            photo_url: conversation.photo_url,
        })
    }
}
