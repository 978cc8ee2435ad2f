//! SQLite implementation of GroupRepository
//!
//! Groups are conversations of kind `group`; membership shares the
//! participants table with direct conversations.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::instrument;

use messenger_core::entities::{Conversation, Group};
use messenger_core::error::DomainError;
use messenger_core::traits::{GroupRepository, NewGroup, RepoResult};
use messenger_core::validation::{validate_group_members, validate_group_name, validate_photo_url};
use messenger_core::value_objects::Snowflake;

use crate::mappers::ConversationInsert;
use crate::models::ConversationModel;

use super::error::{group_not_found, map_db_error, user_not_found};
use super::lookups::{add_participant, participant_usernames, user_id_by_username};

/// SQLite implementation of GroupRepository
#[derive(Clone)]
pub struct SqliteGroupRepository {
    pool: SqlitePool,
}

impl SqliteGroupRepository {
    /// Create a new SqliteGroupRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for SqliteGroupRepository {
    #[instrument(skip(self, group), fields(group_id = %group.conversation.id, members = group.members.len()))]
    async fn create(&self, group: &NewGroup) -> RepoResult<Group> {
        let conversation = &group.conversation;
        if !conversation.is_group() {
            return Err(DomainError::ValidationError(
                "expected a group conversation".to_string(),
            ));
        }
        let name = conversation.name.as_deref().unwrap_or_default();
        validate_group_name(name)?;
        validate_group_members(&group.members)?;

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let creator_name = sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE id = ?1")
            .bind(group.creator_id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| user_not_found(group.creator_id))?;

        if group.members.contains(&creator_name) {
            return Err(DomainError::ValidationError(
                "the creator is added automatically and must not be listed".to_string(),
            ));
        }

        let mut member_ids = Vec::with_capacity(group.members.len());
        for username in &group.members {
            let id = user_id_by_username(&mut tx, username)
                .await?
                .ok_or_else(|| DomainError::UsernameNotFound(username.clone()))?;
            member_ids.push(id);
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

        add_participant(&mut tx, conversation.id, group.creator_id, insert.created_at).await?;
        for member_id in member_ids {
            add_participant(&mut tx, conversation.id, member_id, insert.created_at).await?;
        }

        tx.commit().await.map_err(map_db_error)?;

        let mut members = Vec::with_capacity(group.members.len() + 1);
        members.push(creator_name);
        members.extend(group.members.iter().cloned());

        Ok(Group {
            id: conversation.id,
            name: name.to_string(),
            photo_url: conversation.photo_url.clone(),
            created_at: conversation.created_at,
            members,
        })
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Group>> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT id, kind, name, photo_url, last_message, last_activity_at, created_at
            FROM conversations
            WHERE id = ?1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_db_error)?;

        let Some(model) = model.filter(ConversationModel::is_group) else {
            return Ok(None);
        };

        let members = participant_usernames(&mut conn, id).await?;
        let conversation = Conversation::try_from(model)?;

        Ok(Some(Group {
            id: conversation.id,
            name: conversation.name.unwrap_or_default(),
            photo_url: conversation.photo_url,
            created_at: conversation.created_at,
            members,
        }))
    }

    #[instrument(skip(self))]
    async fn update_name(&self, id: Snowflake, name: &str) -> RepoResult<()> {
        validate_group_name(name)?;

        let result = sqlx::query("UPDATE conversations SET name = ?2 WHERE id = ?1 AND kind = 'group'")
            .bind(id.into_inner())
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(group_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_photo(&self, id: Snowflake, photo_url: &str) -> RepoResult<()> {
        validate_photo_url(photo_url)?;

        let result =
            sqlx::query("UPDATE conversations SET photo_url = ?2 WHERE id = ?1 AND kind = 'group'")
                .bind(id.into_inner())
                .bind(photo_url)
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(group_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_member(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM conversation_participants
            WHERE conversation_id = ?1 AND user_id = ?2
              AND conversation_id IN (SELECT id FROM conversations WHERE kind = 'group')
            ",
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MembershipNotFound);
        }

        Ok(())
    }
}
