//! User and session entity <-> model mapper

use messenger_core::entities::{Session, User};
use messenger_core::value_objects::Snowflake;

use crate::models::{SessionModel, UserModel};

use super::time::{from_millis, to_millis};

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            token: model.token,
            photo_url: model.photo_url,
            created_at: from_millis(model.created_at),
        }
    }
}

/// Convert SessionModel to Session entity
impl From<SessionModel> for Session {
    fn from(model: SessionModel) -> Self {
        Session {
            identifier: model.identifier,
            user_id: Snowflake::new(model.user_id),
            username: model.username,
        }
    }
}

/// Convert User entity reference to values for database insertion
pub struct UserInsert<'a> {
    pub id: i64,
    pub username: &'a str,
    pub token: &'a str,
    pub photo_url: Option<&'a str>,
    pub created_at: i64,
}

impl<'a> UserInsert<'a> {
    pub fn new(user: &'a User) -> Self {
        Self {
            id: user.id.into_inner(),
            username: &user.username,
            token: &user.token,
            photo_url: user.photo_url.as_deref(),
            created_at: to_millis(user.created_at),
        }
    }
}
