//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every method that writes more than one row
//! must commit those rows atomically or not at all.

use async_trait::async_trait;

use crate::entities::{
    Conversation, ConversationDetail, ConversationSummary, Group, Message, MessageWithReactions,
    Reaction, Session, User,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Find user by auth token
    async fn find_by_token(&self, token: &str) -> RepoResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Rename a user, updating every denormalized copy of the username
    async fn rename(&self, id: Snowflake, new_username: &str) -> RepoResult<()>;

    /// Replace the profile photo URL
    async fn update_photo(&self, id: Snowflake, photo_url: &str) -> RepoResult<()>;
}

// ============================================================================
// Session Repository
// ============================================================================

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Open a session for `candidate.username`
    ///
    /// `candidate` is inserted only if no user holds that username yet;
    /// otherwise the existing user is reused.
    async fn login(&self, candidate: &User, identifier: &str) -> RepoResult<(User, Session)>;

    /// Find session by identifier
    async fn find(&self, identifier: &str) -> RepoResult<Option<Session>>;

    /// List every session opened by a user
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Session>>;
}

// ============================================================================
// Conversation Repository
// ============================================================================

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Create a direct conversation between `initiator` and the user named `other`
    async fn create_direct(
        &self,
        conversation: &Conversation,
        initiator: Snowflake,
        other: &str,
    ) -> RepoResult<()>;

    /// Find conversation by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Conversation>>;

    /// List all conversations of a user, most recently active first
    async fn list_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<ConversationSummary>>;

    /// Check if user takes part in the conversation, whatever its kind
    async fn is_participant(&self, conversation_id: Snowflake, user_id: Snowflake)
        -> RepoResult<bool>;

    /// Get kind, participants and group attributes
    async fn detail(&self, id: Snowflake) -> RepoResult<ConversationDetail>;
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find message by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>>;

    /// List messages in a conversation, oldest first, with their reactions
    async fn find_by_conversation(
        &self,
        conversation_id: Snowflake,
    ) -> RepoResult<Vec<MessageWithReactions>>;

    /// Store a new message and make it the conversation's preview
    async fn create(&self, message: &Message) -> RepoResult<Message>;

    /// Copy an existing message into another conversation under a new id
    async fn forward(
        &self,
        original_id: Snowflake,
        new_id: Snowflake,
        target_conversation_id: Snowflake,
        sender_id: Snowflake,
    ) -> RepoResult<Message>;

    /// Hard delete a message and its reactions
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Find the reaction a user left on a message
    async fn find(&self, message_id: Snowflake, user_id: Snowflake)
        -> RepoResult<Option<Reaction>>;

    /// Get all reactions for a message
    async fn find_by_message(&self, message_id: Snowflake) -> RepoResult<Vec<Reaction>>;

    /// Add a reaction, replacing the user's previous one on the same message
    async fn upsert(&self, reaction: &Reaction) -> RepoResult<()>;

    /// Remove a user's reaction; fails if there was none
    async fn delete(&self, message_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Group Repository
// ============================================================================

/// Input for group creation
#[derive(Debug, Clone)]
pub struct NewGroup {
    /// Backing conversation, kind `Group`
    pub conversation: Conversation,
    pub creator_id: Snowflake,
    /// Usernames to add besides the creator
    pub members: Vec<String>,
}

#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Create a group with its creator and members
    async fn create(&self, group: &NewGroup) -> RepoResult<Group>;

    /// Find group by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Group>>;

    /// Rename a group
    async fn update_name(&self, id: Snowflake, name: &str) -> RepoResult<()>;

    /// Replace the group photo URL
    async fn update_photo(&self, id: Snowflake, photo_url: &str) -> RepoResult<()>;

    /// Remove one member; the group survives even when it becomes empty
    async fn remove_member(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<()>;
}
