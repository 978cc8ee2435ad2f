//! Response DTOs
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// User Responses
// ============================================================================

/// Public user profile
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    /// Empty when no photo was set
    pub photo_url: String,
    pub created_at: DateTime<Utc>,
}

/// Session as seen by its owner
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub identifier: String,
    pub user_id: String,
    pub username: String,
}

/// Result of a login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Session identifier
    pub identifier: String,
    /// Bearer token of the user
    pub token: String,
    pub user: UserResponse,
}

// ============================================================================
// Conversation Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ConversationResponse {
    pub id: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub last_message: String,
    pub last_activity_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// One row of a user's conversation list
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSummaryResponse {
    pub id: String,
    pub kind: &'static str,
    /// Other participant for direct conversations, group name otherwise
    pub name: String,
    pub photo_url: String,
    pub last_message: String,
    pub last_activity_at: DateTime<Utc>,
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationDetailResponse {
    pub id: String,
    pub kind: &'static str,
    pub participants: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

// ============================================================================
// Message Responses
// ============================================================================

/// Message with its reactions
///
/// Exactly one of `content` and `image_url` is set.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub sender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reactions: Vec<ReactionResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReactionResponse {
    pub message_id: String,
    pub user_id: String,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Group Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct GroupResponse {
    pub id: String,
    pub name: String,
    /// Empty when no photo was set
    pub photo_url: String,
    pub created_at: DateTime<Utc>,
    pub members: Vec<String>,
}
