//! # messenger-core
//!
//! Domain layer containing entities, value objects, validation rules and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod validation;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Conversation, ConversationDetail, ConversationKind, ConversationSummary, Group, Message,
    MessageBody, MessageWithReactions, Reaction, Session, User, IMAGE_PREVIEW,
};
pub use error::{DomainError, ErrorKind};
pub use traits::{
    ConversationRepository, GroupRepository, MessageRepository, NewGroup, ReactionRepository,
    RepoResult, SessionRepository, UserRepository,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
