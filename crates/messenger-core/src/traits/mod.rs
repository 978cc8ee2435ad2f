//! Repository traits (ports)

mod repositories;

pub use repositories::{
    ConversationRepository, GroupRepository, MessageRepository, NewGroup, ReactionRepository,
    RepoResult, SessionRepository, UserRepository,
};
