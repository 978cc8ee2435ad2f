//! Business logic services
//!
//! This module contains the service layer: identity checks on the acting
//! user, id generation, and orchestration of repository calls.

pub mod context;
pub mod conversation;
pub mod error;
pub mod group;
pub mod message;
pub mod reaction;
pub mod user;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use conversation::ConversationService;
pub use error::{ServiceError, ServiceResult};
pub use group::GroupService;
pub use message::MessageService;
pub use reaction::ReactionService;
pub use user::UserService;
