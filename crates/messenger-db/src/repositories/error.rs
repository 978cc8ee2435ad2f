//! Error handling utilities for repositories

use messenger_core::error::DomainError;
use messenger_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;
use tracing::warn;

/// Convert SQLx error to DomainError
///
/// Engine errors keep the SQLite result code so busy/locked failures can be
/// told apart in logs.
pub fn map_db_error(e: SqlxError) -> DomainError {
    match e.as_database_error() {
        Some(db_err) => DomainError::DatabaseError(format!(
            "sqlite error {}: {}",
            db_err.code().unwrap_or_default(),
            db_err.message()
        )),
        None => DomainError::DatabaseError(e.to_string()),
    }
}

/// Map a UNIQUE constraint failure to `on_unique`, anything else to `map_db_error`
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if e
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
    {
        return on_unique();
    }
    map_db_error(e)
}

pub fn user_not_found(id: Snowflake) -> DomainError {
    DomainError::UserNotFound(id)
}

pub fn conversation_not_found(id: Snowflake) -> DomainError {
    DomainError::ConversationNotFound(id)
}

pub fn group_not_found(id: Snowflake) -> DomainError {
    DomainError::GroupNotFound(id)
}

pub fn message_not_found(id: Snowflake) -> DomainError {
    DomainError::MessageNotFound(id)
}

/// Rejected write from a user outside the conversation
pub fn not_participant(conversation_id: Snowflake, user_id: Snowflake) -> DomainError {
    warn!(
        conversation_id = %conversation_id,
        user_id = %user_id,
        "Rejected non-participant"
    );
    DomainError::NotParticipant
}
