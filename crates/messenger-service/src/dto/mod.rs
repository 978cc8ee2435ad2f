//! Data transfer objects for service responses
//!
//! This module provides:
//! - Response DTOs for serializing service outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod responses;

pub use responses::{
    ConversationDetailResponse, ConversationResponse, ConversationSummaryResponse,
    GroupResponse, LoginResponse, MessageResponse, ReactionResponse, SessionResponse,
    UserResponse,
};
