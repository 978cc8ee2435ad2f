//! Repository implementations
//!
//! SQLite implementations of the repository traits defined in messenger-core.
//! Each repository handles database operations for a specific domain entity.

mod conversation;
mod error;
mod group;
mod lookups;
mod message;
mod reaction;
mod session;
mod user;

pub use conversation::SqliteConversationRepository;
pub use group::SqliteGroupRepository;
pub use message::SqliteMessageRepository;
pub use reaction::SqliteReactionRepository;
pub use session::SqliteSessionRepository;
pub use user::SqliteUserRepository;
