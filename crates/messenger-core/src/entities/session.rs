//! Session entity - one successful name-based login

use crate::value_objects::Snowflake;

/// Login session
///
/// `username` is a copy of the user's name at login time and is kept in sync
/// when the user renames themself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub identifier: String,
    pub user_id: Snowflake,
    pub username: String,
}

impl Session {
    /// Create a new Session
    pub fn new(identifier: String, user_id: Snowflake, username: String) -> Self {
        Self {
            identifier,
            user_id,
            username,
        }
    }
}
