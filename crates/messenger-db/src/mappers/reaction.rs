//! Reaction entity <-> model mapper

use messenger_core::entities::Reaction;
use messenger_core::value_objects::Snowflake;

use crate::models::ReactionModel;

use super::time::{from_millis, to_millis};

/// Convert ReactionModel to Reaction entity
impl From<ReactionModel> for Reaction {
    fn from(model: ReactionModel) -> Self {
        Reaction {
            message_id: Snowflake::new(model.message_id),
            user_id: Snowflake::new(model.user_id),
            emoji: model.emoji,
            created_at: from_millis(model.created_at),
        }
    }
}

/// Convert Reaction entity reference to values for database insertion
pub struct ReactionInsert<'a> {
    pub message_id: i64,
    pub user_id: i64,
    pub emoji: &'a str,
    pub created_at: i64,
}

impl<'a> ReactionInsert<'a> {
    pub fn new(reaction: &'a Reaction) -> Self {
        Self {
            message_id: reaction.message_id.into_inner(),
            user_id: reaction.user_id.into_inner(),
            emoji: &reaction.emoji,
            created_at: to_millis(reaction.created_at),
        }
    }
}
