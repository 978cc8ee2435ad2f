//! Message entity - represents a chat message

use chrono::{DateTime, Utc};

use crate::entities::Reaction;
use crate::value_objects::Snowflake;

/// Preview text stored on a conversation when its latest message is an image
pub const IMAGE_PREVIEW: &str = "[Image]";

/// Message payload: exactly one of text or an image reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Text(String),
    /// URL of an uploaded image; the bytes live outside the database
    Image(String),
}

impl MessageBody {
    /// Text shown in conversation list previews
    pub fn preview(&self) -> &str {
        match self {
            Self::Text(text) => text.as_str(),
            Self::Image(_) => IMAGE_PREVIEW,
        }
    }

    /// Text content, if this is a text body
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Image(_) => None,
        }
    }

    /// Image reference, if this is an image body
    pub fn image_url(&self) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::Image(url) => Some(url.as_str()),
        }
    }

    #[inline]
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }
}

/// Message entity
///
/// `sender_id` is authoritative. `sender` carries the sender's current
/// username and is resolved by the store on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub conversation_id: Snowflake,
    pub sender_id: Snowflake,
    pub sender: String,
    pub body: MessageBody,
    pub reply_to: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new Message
    pub fn new(
        id: Snowflake,
        conversation_id: Snowflake,
        sender_id: Snowflake,
        sender: String,
        body: MessageBody,
    ) -> Self {
        Self {
            id,
            conversation_id,
            sender_id,
            sender,
            body,
            reply_to: None,
            created_at: Utc::now(),
        }
    }

    /// Create a reply message
    pub fn new_reply(
        id: Snowflake,
        conversation_id: Snowflake,
        sender_id: Snowflake,
        sender: String,
        body: MessageBody,
        reply_to: Snowflake,
    ) -> Self {
        Self {
            reply_to: Some(reply_to),
            ..Self::new(id, conversation_id, sender_id, sender, body)
        }
    }

    /// Copy of this message's body sent by someone else into another conversation
    ///
    /// The reply reference is not carried over.
    pub fn forwarded(
        &self,
        id: Snowflake,
        conversation_id: Snowflake,
        sender_id: Snowflake,
        sender: String,
    ) -> Self {
        Self::new(id, conversation_id, sender_id, sender, self.body.clone())
    }

    /// Check if message is a reply
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.reply_to.is_some()
    }

    /// Preview text for the owning conversation
    #[inline]
    pub fn preview(&self) -> &str {
        self.body.preview()
    }
}

/// A message together with the reactions attached to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageWithReactions {
    pub message: Message,
    pub reactions: Vec<Reaction>,
}

impl MessageWithReactions {
    /// Wrap a message that has no reactions yet
    pub fn new(message: Message) -> Self {
        Self {
            message,
            reactions: Vec::new(),
        }
    }

    /// The reaction `user_id` left on this message, if any
    pub fn reaction_of(&self, user_id: Snowflake) -> Option<&Reaction> {
        self.reactions.iter().find(|r| r.is_from(user_id))
    }
}
