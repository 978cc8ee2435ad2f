//! User entity - represents a messenger account

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User entity
///
/// `id` is the stable identity. `username` is a unique but mutable label that
/// most external APIs use to refer to people.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub token: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with no photo
    pub fn new(id: Snowflake, username: String, token: String) -> Self {
        Self {
            id,
            username,
            token,
            photo_url: None,
            created_at: Utc::now(),
        }
    }

    /// Photo URL or an empty string, the form list views expect
    pub fn photo_or_empty(&self) -> &str {
        self.photo_url.as_deref().unwrap_or_default()
    }

    /// Check if the user has uploaded a profile photo
    #[inline]
    pub fn has_photo(&self) -> bool {
        self.photo_url.is_some()
    }
}
