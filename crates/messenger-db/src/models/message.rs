//! Message database models

use sqlx::FromRow;

/// Message row joined with its sender's current username
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub conversation_id: i64,
    pub sender_id: i64,
    pub sender: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub reply_to: Option<i64>,
    pub created_at: i64,
}

impl MessageModel {
    /// Check if message is a reply
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.reply_to.is_some()
    }
}

/// Message row LEFT JOINed with at most one of its reactions
#[derive(Debug, Clone, FromRow)]
pub struct MessageReactionModel {
    #[sqlx(flatten)]
    pub message: MessageModel,
    pub reaction_user_id: Option<i64>,
    pub reaction_emoji: Option<String>,
    pub reaction_created_at: Option<i64>,
}
