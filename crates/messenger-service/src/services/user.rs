//! User service
//!
//! Handles login, profile lookups, and profile updates.

use messenger_core::entities::User;
use messenger_core::validation::validate_username;
use messenger_core::Snowflake;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{LoginResponse, SessionResponse, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Log in by username, creating the user on first login
    ///
    /// Every call opens a new session.
    #[instrument(skip(self))]
    pub async fn login(&self, username: &str) -> ServiceResult<LoginResponse> {
        validate_username(username)?;

        let candidate = User::new(
            self.ctx.generate_id(),
            username.to_string(),
            Uuid::new_v4().to_string(),
        );
        let identifier = Uuid::new_v4().to_string();

        let (user, session) = self
            .ctx
            .session_repo()
            .login(&candidate, &identifier)
            .await?;

        info!(
            user_id = %user.id,
            created = user.id == candidate.id,
            "User logged in"
        );

        Ok(LoginResponse {
            identifier: session.identifier,
            token: user.token.clone(),
            user: UserResponse::from(&user),
        })
    }

    /// Get user by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        self.get_user_entity(user_id).await.map(UserResponse::from)
    }

    /// Get user entity by ID
    #[instrument(skip(self))]
    pub async fn get_user_entity(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))
    }

    #[instrument(skip(self))]
    pub async fn get_by_username(&self, username: &str) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", username))?;

        Ok(UserResponse::from(user))
    }

    /// Resolve the user owning a bearer token
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_token(token)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", "token"))
    }

    /// Change a username
    ///
    /// Messages, conversation lists and sessions all show the new name as
    /// soon as this returns.
    #[instrument(skip(self))]
    pub async fn rename(&self, user_id: Snowflake, new_username: &str) -> ServiceResult<UserResponse> {
        self.ctx.user_repo().rename(user_id, new_username).await?;

        info!(user_id = %user_id, username = %new_username, "User renamed");

        self.get_user(user_id).await
    }

    #[instrument(skip(self))]
    pub async fn update_photo(&self, user_id: Snowflake, photo_url: &str) -> ServiceResult<UserResponse> {
        self.ctx.user_repo().update_photo(user_id, photo_url).await?;

        info!(user_id = %user_id, "User photo updated");

        self.get_user(user_id).await
    }

    /// Look up a session by its identifier
    #[instrument(skip(self, identifier))]
    pub async fn get_session(&self, identifier: &str) -> ServiceResult<SessionResponse> {
        let session = self
            .ctx
            .session_repo()
            .find(identifier)
            .await?
            .ok_or_else(|| ServiceError::not_found("Session", identifier))?;

        Ok(SessionResponse::from(session))
    }

    /// All sessions opened by a user
    #[instrument(skip(self))]
    pub async fn list_sessions(&self, user_id: Snowflake) -> ServiceResult<Vec<SessionResponse>> {
        let sessions = self.ctx.session_repo().find_by_user(user_id).await?;
        Ok(sessions.into_iter().map(SessionResponse::from).collect())
    }
}
