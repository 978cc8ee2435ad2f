//! SQLite implementation of UserRepository

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::instrument;

use messenger_core::entities::User;
use messenger_core::error::DomainError;
use messenger_core::traits::{RepoResult, UserRepository};
use messenger_core::validation::{validate_photo_url, validate_username};
use messenger_core::value_objects::Snowflake;

use crate::mappers::UserInsert;
use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, user_not_found};
use super::lookups::user_id_by_username;

/// SQLite implementation of UserRepository
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new SqliteUserRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, token, photo_url, created_at
            FROM users
            WHERE id = ?1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, token, photo_url, created_at
            FROM users
            WHERE username = ?1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, token))]
    async fn find_by_token(&self, token: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, token, photo_url, created_at
            FROM users
            WHERE token = ?1
            ",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, user), fields(user_id = %user.id, username = %user.username))]
    async fn create(&self, user: &User) -> RepoResult<()> {
        validate_username(&user.username)?;
        let insert = UserInsert::new(user);

        sqlx::query(
            r"
            INSERT INTO users (id, username, token, photo_url, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(insert.id)
        .bind(insert.username)
        .bind(insert.token)
        .bind(insert.photo_url)
        .bind(insert.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::UsernameTaken(user.username.clone())))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn rename(&self, id: Snowflake, new_username: &str) -> RepoResult<()> {
        validate_username(new_username)?;

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let current = sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE id = ?1")
            .bind(id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| user_not_found(id))?;

        if current == new_username {
            return Err(DomainError::SameUsername);
        }

        if let Some(holder) = user_id_by_username(&mut tx, new_username).await? {
            if holder != id {
                return Err(DomainError::UsernameTaken(new_username.to_string()));
            }
        }

        sqlx::query("UPDATE users SET username = ?2 WHERE id = ?1")
            .bind(id.into_inner())
            .bind(new_username)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                map_unique_violation(e, || DomainError::UsernameTaken(new_username.to_string()))
            })?;

        // Sessions carry a copy of the username
        sqlx::query("UPDATE sessions SET username = ?2 WHERE user_id = ?1")
            .bind(id.into_inner())
            .bind(new_username)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_photo(&self, id: Snowflake, photo_url: &str) -> RepoResult<()> {
        validate_photo_url(photo_url)?;

        let result = sqlx::query("UPDATE users SET photo_url = ?2 WHERE id = ?1")
            .bind(id.into_inner())
            .bind(photo_url)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }
}
