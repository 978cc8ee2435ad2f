//! User and session database models

use sqlx::FromRow;

/// Database model for users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub token: String,
    pub photo_url: Option<String>,
    pub created_at: i64,
}

/// Database model for sessions table
#[derive(Debug, Clone, FromRow)]
pub struct SessionModel {
    pub identifier: String,
    pub user_id: i64,
    pub username: String,
}
