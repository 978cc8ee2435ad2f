//! Domain entities - core business objects

mod conversation;
mod group;
mod message;
mod reaction;
mod session;
mod user;

pub use conversation::{
    Conversation, ConversationDetail, ConversationKind, ConversationSummary,
    UnknownConversationKind,
};
pub use group::Group;
pub use message::{Message, MessageBody, MessageWithReactions, IMAGE_PREVIEW};
pub use reaction::Reaction;
pub use session::Session;
pub use user::User;
