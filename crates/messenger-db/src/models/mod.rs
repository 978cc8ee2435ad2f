//! Database models - SQLx-compatible structs for SQLite tables and joined reads

mod conversation;
mod message;
mod reaction;
mod user;

pub use conversation::{ConversationListModel, ConversationModel, ParticipantModel};
pub use message::{MessageModel, MessageReactionModel};
pub use reaction::ReactionModel;
pub use user::{SessionModel, UserModel};
