//! Entity to model mappers
//!
//! This module provides conversions between domain entities (messenger-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert` structs: Prepare entity data for database operations

mod conversation;
mod message;
mod reaction;
mod time;
mod user;

pub use conversation::{summary_from_row, ConversationInsert};
pub use message::{group_reactions, MessageInsert};
pub use reaction::ReactionInsert;
pub use time::{from_millis, to_millis};
pub use user::UserInsert;
