//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Coarse error category callers map to transport-level responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    AlreadyExists,
    PermissionDenied,
    Internal,
}

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("No user named '{0}'")]
    UsernameNotFound(String),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(Snowflake),

    #[error("Group not found: {0}")]
    GroupNotFound(Snowflake),

    #[error("Message not found: {0}")]
    MessageNotFound(Snowflake),

    #[error("Reaction not found")]
    ReactionNotFound,

    #[error("User is not a member of this group")]
    MembershipNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("New username is the same as the current username")]
    SameUsername,

    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),

    #[error("Reaction must be between {min} and {max} characters")]
    InvalidReaction { min: usize, max: usize },

    #[error("Group needs between {min} and {max} members besides the creator, got {actual}")]
    GroupSizeOutOfRange { min: usize, max: usize, actual: usize },

    #[error("Replied message {0} is not in this conversation")]
    InvalidReplyTarget(Snowflake),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("User is not a participant of this conversation")]
    NotParticipant,

    #[error("Not message sender")]
    NotMessageSender,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get the error category
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UserNotFound(_)
            | Self::UsernameNotFound(_)
            | Self::ConversationNotFound(_)
            | Self::GroupNotFound(_)
            | Self::MessageNotFound(_)
            | Self::ReactionNotFound
            | Self::MembershipNotFound => ErrorKind::NotFound,

            Self::ValidationError(_)
            | Self::InvalidUsername(_)
            | Self::SameUsername
            | Self::UnknownParticipant(_)
            | Self::InvalidReaction { .. }
            | Self::GroupSizeOutOfRange { .. }
            | Self::InvalidReplyTarget(_) => ErrorKind::InvalidArgument,

            Self::NotParticipant | Self::NotMessageSender => ErrorKind::PermissionDenied,

            Self::UsernameTaken(_) => ErrorKind::AlreadyExists,

            Self::DatabaseError(_) | Self::InternalError(_) => ErrorKind::Internal,
        }
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) | Self::UsernameNotFound(_) => "UNKNOWN_USER",
            Self::ConversationNotFound(_) => "UNKNOWN_CONVERSATION",
            Self::GroupNotFound(_) => "UNKNOWN_GROUP",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::ReactionNotFound => "UNKNOWN_REACTION",
            Self::MembershipNotFound => "UNKNOWN_MEMBER",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::SameUsername => "SAME_USERNAME",
            Self::UnknownParticipant(_) => "UNKNOWN_PARTICIPANT",
            Self::InvalidReaction { .. } => "INVALID_REACTION",
            Self::GroupSizeOutOfRange { .. } => "GROUP_SIZE_OUT_OF_RANGE",
            Self::InvalidReplyTarget(_) => "INVALID_REPLY_TARGET",

            // Authorization
            Self::NotParticipant => "NOT_PARTICIPANT",
            Self::NotMessageSender => "NOT_MESSAGE_SENDER",

            // Conflict
            Self::UsernameTaken(_) => "USERNAME_TAKEN",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        self.kind() == ErrorKind::PermissionDenied
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::AlreadyExists
    }
}
