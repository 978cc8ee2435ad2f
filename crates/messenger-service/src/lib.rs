//! # messenger-service
//!
//! Application layer containing use cases, actor checks, and DTOs.
//!
//! Every operation is an `async fn` on a short-lived service borrowing a
//! shared [`ServiceContext`]:
//!
//! ```rust,ignore
//! let ctx = ServiceContext::connect(&AppConfig::from_env()?).await?;
//! let session = UserService::new(&ctx).login("maria").await?;
//! ```

pub mod dto;
pub mod services;

pub use services::{
    ConversationService, GroupService, MessageService, ReactionService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
