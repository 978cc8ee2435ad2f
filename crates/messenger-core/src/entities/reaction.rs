//! Reaction entity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Emoji left by one user on one message
///
/// Keyed by `(message_id, user_id)`: reacting again replaces the emoji and
/// the timestamp instead of adding a second reaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub message_id: Snowflake,
    pub user_id: Snowflake,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    pub fn new(message_id: Snowflake, user_id: Snowflake, emoji: String) -> Self {
        Self {
            message_id,
            user_id,
            emoji,
            created_at: Utc::now(),
        }
    }

    /// Whether this is `user_id`'s reaction
    #[inline]
    pub fn is_from(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }
}
