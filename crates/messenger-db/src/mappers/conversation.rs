//! Conversation entity <-> model mapper

use messenger_core::entities::{
    Conversation, ConversationKind, ConversationSummary, IMAGE_PREVIEW,
};
use messenger_core::error::DomainError;
use messenger_core::value_objects::Snowflake;

use crate::models::{ConversationListModel, ConversationModel};

use super::time::{from_millis, to_millis};

fn parse_kind(kind: &str) -> Result<ConversationKind, DomainError> {
    // The table CHECK constraint only admits known kinds
    kind.parse::<ConversationKind>()
        .map_err(|e| DomainError::DatabaseError(e.to_string()))
}

/// Convert ConversationModel to Conversation entity
impl TryFrom<ConversationModel> for Conversation {
    type Error = DomainError;

    fn try_from(model: ConversationModel) -> Result<Self, Self::Error> {
        Ok(Conversation {
            id: Snowflake::new(model.id),
            kind: parse_kind(&model.kind)?,
            name: model.name,
            photo_url: model.photo_url,
            last_message: model.last_message,
            last_activity_at: from_millis(model.last_activity_at),
            created_at: from_millis(model.created_at),
        })
    }
}

/// Build a list entry from its row and participant usernames
///
/// The preview is derived from the newest message, so it is correct even if
/// the cached columns on the conversation row lag behind.
pub fn summary_from_row(
    row: ConversationListModel,
    participants: Vec<String>,
) -> Result<ConversationSummary, DomainError> {
    let kind = parse_kind(&row.kind)?;

    let last_message = match (row.latest_content, row.latest_image_url) {
        (Some(text), _) => text,
        (None, Some(_)) => IMAGE_PREVIEW.to_string(),
        (None, None) => String::new(),
    };

    let (name, photo_url) = match kind {
        ConversationKind::Group => (row.name, row.photo_url),
        ConversationKind::Direct => (row.other_username, row.other_photo_url),
    };

    Ok(ConversationSummary {
        id: Snowflake::new(row.id),
        kind,
        name: name.unwrap_or_default(),
        photo_url: photo_url.unwrap_or_default(),
        last_message,
        last_activity_at: from_millis(row.latest_created_at.unwrap_or(row.created_at)),
        participants,
    })
}

/// Convert Conversation entity reference to values for database insertion
pub struct ConversationInsert<'a> {
    pub id: i64,
    pub kind: &'static str,
    pub name: Option<&'a str>,
    pub photo_url: Option<&'a str>,
    pub created_at: i64,
}

impl<'a> ConversationInsert<'a> {
    pub fn new(conversation: &'a Conversation) -> Self {
        Self {
            id: conversation.id.into_inner(),
            kind: conversation.kind.as_str(),
            name: conversation.name.as_deref(),
            photo_url: conversation.photo_url.as_deref(),
            created_at: to_millis(conversation.created_at),
        }
    }
}
