//! SQLite implementation of SessionRepository

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use messenger_core::entities::{Session, User};
use messenger_core::error::DomainError;
use messenger_core::traits::{RepoResult, SessionRepository};
use messenger_core::validation::validate_username;
use messenger_core::value_objects::Snowflake;

use crate::mappers::UserInsert;
use crate::models::{SessionModel, UserModel};

use super::error::map_db_error;

/// SQLite implementation of SessionRepository
#[derive(Clone)]
pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    /// Create a new SqliteSessionRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    #[instrument(skip(self, candidate, identifier), fields(username = %candidate.username))]
    async fn login(&self, candidate: &User, identifier: &str) -> RepoResult<(User, Session)> {
        validate_username(&candidate.username)?;

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Insert first so concurrent first logins converge on one row
        let insert = UserInsert::new(candidate);
        let inserted = sqlx::query(
            r"
            INSERT INTO users (id, username, token, photo_url, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(username) DO NOTHING
            ",
        )
        .bind(insert.id)
        .bind(insert.username)
        .bind(insert.token)
        .bind(insert.photo_url)
        .bind(insert.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let user = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, token, photo_url, created_at
            FROM users
            WHERE username = ?1
            ",
        )
        .bind(&candidate.username)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .map(User::from)
        .ok_or_else(|| DomainError::UsernameNotFound(candidate.username.clone()))?;

        if inserted.rows_affected() > 0 {
            debug!(user_id = %user.id, "Created user on first login");
        }

        sqlx::query(
            r"
            INSERT INTO sessions (identifier, user_id, username)
            VALUES (?1, ?2, ?3)
            ",
        )
        .bind(identifier)
        .bind(user.id.into_inner())
        .bind(&user.username)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        let session = Session::new(identifier.to_string(), user.id, user.username.clone());
        Ok((user, session))
    }

    #[instrument(skip(self, identifier))]
    async fn find(&self, identifier: &str) -> RepoResult<Option<Session>> {
        let result = sqlx::query_as::<_, SessionModel>(
            "SELECT identifier, user_id, username FROM sessions WHERE identifier = ?1",
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Session::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Session>> {
        let results = sqlx::query_as::<_, SessionModel>(
            r"
            SELECT identifier, user_id, username
            FROM sessions
            WHERE user_id = ?1
            ORDER BY rowid
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Session::from).collect())
    }
}
