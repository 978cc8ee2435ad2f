//! Conversation entity - a direct chat or a group, distinguished by kind

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::value_objects::Snowflake;

/// Conversation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConversationKind {
    /// Exactly two participants, fixed at creation
    #[default]
    Direct,
    /// Named conversation with mutable membership
    Group,
}

impl ConversationKind {
    /// Storage representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Group => "group",
        }
    }

}

/// Error when a stored kind is neither `direct` nor `group`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown conversation kind: '{0}'")]
pub struct UnknownConversationKind(pub String);

impl FromStr for ConversationKind {
    type Err = UnknownConversationKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "direct" => Ok(Self::Direct),
            "group" => Ok(Self::Group),
            other => Err(UnknownConversationKind(other.to_string())),
        }
    }
}

/// Conversation entity
///
/// `last_message` and `last_activity_at` are the denormalized preview used by
/// list views. They describe the most recent message, or are empty and equal
/// to `created_at` while the conversation has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: Snowflake,
    pub kind: ConversationKind,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub last_message: String,
    pub last_activity_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new direct conversation
    #[must_use]
    pub fn new_direct(id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            kind: ConversationKind::Direct,
            name: None,
            photo_url: None,
            last_message: String::new(),
            last_activity_at: now,
            created_at: now,
        }
    }

    /// Create a new group conversation
    #[must_use]
    pub fn new_group(id: Snowflake, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            kind: ConversationKind::Group,
            name: Some(name),
            photo_url: None,
            last_message: String::new(),
            last_activity_at: now,
            created_at: now,
        }
    }

    /// Check if this is a group
    #[inline]
    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ConversationKind::Group)
    }

    /// Check if any message has been sent yet
    #[inline]
    #[must_use]
    pub fn has_messages(&self) -> bool {
        !self.last_message.is_empty()
    }
}

/// Row of the conversation list shown to one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationSummary {
    pub id: Snowflake,
    pub kind: ConversationKind,
    /// Group name, or the other participant's username for direct chats
    pub name: String,
    /// Group photo, or the other participant's photo for direct chats
    pub photo_url: String,
    pub last_message: String,
    pub last_activity_at: DateTime<Utc>,
    pub participants: Vec<String>,
}

/// Conversation detail view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationDetail {
    pub id: Snowflake,
    pub kind: ConversationKind,
    pub participants: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}
