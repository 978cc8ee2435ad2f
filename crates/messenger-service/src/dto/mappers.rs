//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use messenger_core::entities::{
    Conversation, ConversationDetail, ConversationSummary, Group, Message, MessageWithReactions,
    Reaction, Session, User,
};

use super::responses::{
    ConversationDetailResponse, ConversationResponse, ConversationSummaryResponse,
    GroupResponse, MessageResponse, ReactionResponse, SessionResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            photo_url: user.photo_or_empty().to_string(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            identifier: session.identifier,
            user_id: session.user_id.to_string(),
            username: session.username,
        }
    }
}

// ============================================================================
// Conversation Mappers
// ============================================================================

impl From<Conversation> for ConversationResponse {
    fn from(conversation: Conversation) -> Self {
        Self {
            id: conversation.id.to_string(),
            kind: conversation.kind.as_str(),
            name: conversation.name,
            photo_url: conversation.photo_url,
            last_message: conversation.last_message,
            last_activity_at: conversation.last_activity_at,
            created_at: conversation.created_at,
        }
    }
}

impl From<ConversationSummary> for ConversationSummaryResponse {
    fn from(summary: ConversationSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            kind: summary.kind.as_str(),
            name: summary.name,
            photo_url: summary.photo_url,
            last_message: summary.last_message,
            last_activity_at: summary.last_activity_at,
            participants: summary.participants,
        }
    }
}

impl From<ConversationDetail> for ConversationDetailResponse {
    fn from(detail: ConversationDetail) -> Self {
        Self {
            id: detail.id.to_string(),
            kind: detail.kind.as_str(),
            participants: detail.participants,
            name: detail.name,
            photo_url: detail.photo_url,
        }
    }
}

// ============================================================================
// Message Mappers
// ============================================================================

impl From<&Reaction> for ReactionResponse {
    fn from(reaction: &Reaction) -> Self {
        Self {
            message_id: reaction.message_id.to_string(),
            user_id: reaction.user_id.to_string(),
            emoji: reaction.emoji.clone(),
            created_at: reaction.created_at,
        }
    }
}

impl From<Reaction> for ReactionResponse {
    fn from(reaction: Reaction) -> Self {
        Self::from(&reaction)
    }
}

impl MessageResponse {
    /// Build a response from a message and the reactions attached to it
    pub fn with_reactions(message: Message, reactions: &[Reaction]) -> Self {
        Self {
            id: message.id.to_string(),
            conversation_id: message.conversation_id.to_string(),
            sender_id: message.sender_id.to_string(),
            content: message.body.text().map(str::to_string),
            image_url: message.body.image_url().map(str::to_string),
            sender: message.sender,
            reply_to: message.reply_to.map(|id| id.to_string()),
            created_at: message.created_at,
            reactions: reactions.iter().map(ReactionResponse::from).collect(),
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self::with_reactions(message, &[])
    }
}

impl From<MessageWithReactions> for MessageResponse {
    fn from(item: MessageWithReactions) -> Self {
        Self::with_reactions(item.message, &item.reactions)
    }
}

// ============================================================================
// Group Mappers
// ============================================================================

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        Self {
            id: group.id.to_string(),
            photo_url: group.photo_url.unwrap_or_default(),
            name: group.name,
            created_at: group.created_at,
            members: group.members,
        }
    }
}
