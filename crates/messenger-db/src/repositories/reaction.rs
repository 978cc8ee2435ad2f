//! SQLite implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::instrument;

use messenger_core::entities::Reaction;
use messenger_core::error::DomainError;
use messenger_core::traits::{ReactionRepository, RepoResult};
use messenger_core::validation::validate_reaction;
use messenger_core::value_objects::Snowflake;

use crate::mappers::ReactionInsert;
use crate::models::ReactionModel;

use super::error::{map_db_error, message_not_found};

/// SQLite implementation of ReactionRepository
#[derive(Clone)]
pub struct SqliteReactionRepository {
    pool: SqlitePool,
}

impl SqliteReactionRepository {
    /// Create a new SqliteReactionRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for SqliteReactionRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        message_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r"
            SELECT message_id, user_id, emoji, created_at
            FROM reactions
            WHERE message_id = ?1 AND user_id = ?2
            ",
        )
        .bind(message_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Reaction::from))
    }

    #[instrument(skip(self))]
    async fn find_by_message(&self, message_id: Snowflake) -> RepoResult<Vec<Reaction>> {
        let results = sqlx::query_as::<_, ReactionModel>(
            r"
            SELECT message_id, user_id, emoji, created_at
            FROM reactions
            WHERE message_id = ?1
            ORDER BY created_at, user_id
            ",
        )
        .bind(message_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Reaction::from).collect())
    }

    #[instrument(skip(self))]
    async fn upsert(&self, reaction: &Reaction) -> RepoResult<()> {
        validate_reaction(&reaction.emoji)?;

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let message_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM messages WHERE id = ?1)")
                .bind(reaction.message_id.into_inner())
                .fetch_one(&mut *tx)
                .await
                .map_err(map_db_error)?;

        if !message_exists {
            return Err(message_not_found(reaction.message_id));
        }

        let insert = ReactionInsert::new(reaction);
        sqlx::query(
            r"
            INSERT INTO reactions (message_id, user_id, emoji, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (message_id, user_id)
            DO UPDATE SET emoji = excluded.emoji, created_at = excluded.created_at
            ",
        )
        .bind(insert.message_id)
        .bind(insert.user_id)
        .bind(insert.emoji)
        .bind(insert.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, message_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM reactions WHERE message_id = ?1 AND user_id = ?2")
            .bind(message_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ReactionNotFound);
        }

        Ok(())
    }
}
