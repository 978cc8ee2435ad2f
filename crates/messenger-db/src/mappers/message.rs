//! Message entity <-> model mapper

use messenger_core::entities::{Message, MessageBody, MessageWithReactions, Reaction};
use messenger_core::value_objects::Snowflake;

use crate::models::{MessageModel, MessageReactionModel};

use super::time::{from_millis, to_millis};

/// Rebuild the body from the two mutually exclusive columns
fn body_from_columns(content: Option<String>, image_url: Option<String>) -> MessageBody {
    match (content, image_url) {
        (Some(text), _) => MessageBody::Text(text),
        (None, Some(url)) => MessageBody::Image(url),
        // Rejected by the table CHECK constraint
        (None, None) => MessageBody::Text(String::new()),
    }
}

/// Convert MessageModel to Message entity
impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: Snowflake::new(model.id),
            conversation_id: Snowflake::new(model.conversation_id),
            sender_id: Snowflake::new(model.sender_id),
            sender: model.sender,
            body: body_from_columns(model.content, model.image_url),
            reply_to: model.reply_to.map(Snowflake::new),
            created_at: from_millis(model.created_at),
        }
    }
}

/// Fold LEFT JOIN rows (one per reaction, or one per reaction-less message)
/// into one record per message
///
/// Rows must arrive grouped by message, which the `ORDER BY` of the
/// caller's query guarantees. Message order is preserved.
pub fn group_reactions(rows: Vec<MessageReactionModel>) -> Vec<MessageWithReactions> {
    let mut grouped: Vec<MessageWithReactions> = Vec::new();

    for row in rows {
        let message_id = row.message.id;
        let reaction = match (row.reaction_user_id, row.reaction_emoji) {
            (Some(user_id), Some(emoji)) => Some(Reaction {
                message_id: Snowflake::new(message_id),
                user_id: Snowflake::new(user_id),
                emoji,
                created_at: from_millis(row.reaction_created_at.unwrap_or_default()),
            }),
            _ => None,
        };

        match grouped.last_mut() {
            Some(current) if current.message.id.into_inner() == message_id => {
                current.reactions.extend(reaction);
            }
            _ => {
                let mut entry = MessageWithReactions::new(Message::from(row.message));
                entry.reactions.extend(reaction);
                grouped.push(entry);
            }
        }
    }

    grouped
}

/// Convert Message entity reference to values for database insertion
pub struct MessageInsert<'a> {
    pub id: i64,
    pub conversation_id: i64,
    pub sender_id: i64,
    pub content: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub reply_to: Option<i64>,
    pub created_at: i64,
}

impl<'a> MessageInsert<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self {
            id: message.id.into_inner(),
            conversation_id: message.conversation_id.into_inner(),
            sender_id: message.sender_id.into_inner(),
            content: message.body.text(),
            image_url: message.body.image_url(),
            reply_to: message.reply_to.map(Snowflake::into_inner),
            created_at: to_millis(message.created_at),
        }
    }
}
