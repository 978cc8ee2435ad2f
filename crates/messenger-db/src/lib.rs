//! # messenger-db
//!
//! Database layer implementing repository traits with SQLite via SQLx.
//!
//! ## Overview
//!
//! This crate provides SQLite implementations for all repository traits
//! defined in `messenger-core`. It handles:
//!
//! - Connection pool management
//! - Schema bootstrap
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use messenger_db::pool::{create_pool, DatabaseConfig};
//! use messenger_db::repositories::SqliteUserRepository;
//! use messenger_core::traits::UserRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::in_memory()).await?;
//!     messenger_db::schema::migrate(&pool).await?;
//!     let user_repo = SqliteUserRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, SqlitePool};
pub use repositories::{
    SqliteConversationRepository, SqliteGroupRepository, SqliteMessageRepository,
    SqliteReactionRepository, SqliteSessionRepository, SqliteUserRepository,
};
pub use schema::migrate;
