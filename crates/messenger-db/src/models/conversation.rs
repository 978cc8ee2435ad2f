//! Conversation database models

use sqlx::FromRow;

/// Database model for conversations table
#[derive(Debug, Clone, FromRow)]
pub struct ConversationModel {
    pub id: i64,
    pub kind: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub last_message: String,
    pub last_activity_at: i64,
    pub created_at: i64,
}

impl ConversationModel {
    #[inline]
    pub fn is_group(&self) -> bool {
        self.kind == "group"
    }
}

/// One row of a user's conversation list
///
/// The `latest_*` columns come from the newest message, if any. The `other_*`
/// columns are only filled for direct conversations.
#[derive(Debug, Clone, FromRow)]
pub struct ConversationListModel {
    pub id: i64,
    pub kind: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: i64,
    pub latest_content: Option<String>,
    pub latest_image_url: Option<String>,
    pub latest_created_at: Option<i64>,
    pub other_username: Option<String>,
    pub other_photo_url: Option<String>,
}

/// (conversation, username) pair from the participants table
#[derive(Debug, Clone, FromRow)]
pub struct ParticipantModel {
    pub conversation_id: i64,
    pub username: String,
}
