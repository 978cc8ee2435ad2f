//! Service context - dependency container for services
//!
//! Holds all repositories, the id generator, and the pool they share.

use std::sync::Arc;

use messenger_common::AppConfig;
use messenger_core::traits::{
    ConversationRepository, GroupRepository, MessageRepository, ReactionRepository,
    SessionRepository, UserRepository,
};
use messenger_core::{Snowflake, SnowflakeGenerator};
use messenger_db::{
    create_pool, migrate, DatabaseConfig, SqliteConversationRepository, SqliteGroupRepository,
    SqliteMessageRepository, SqlitePool, SqliteReactionRepository, SqliteSessionRepository,
    SqliteUserRepository,
};
use tracing::info;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cloning is cheap; every clone shares the same pool and generator.
#[derive(Clone)]
pub struct ServiceContext {
    pool: SqlitePool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    conversation_repo: Arc<dyn ConversationRepository>,
    message_repo: Arc<dyn MessageRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    group_repo: Arc<dyn GroupRepository>,

    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: SqlitePool,
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
        conversation_repo: Arc<dyn ConversationRepository>,
        message_repo: Arc<dyn MessageRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
        group_repo: Arc<dyn GroupRepository>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            pool,
            user_repo,
            session_repo,
            conversation_repo,
            message_repo,
            reaction_repo,
            group_repo,
            snowflake_generator,
        }
    }

    /// Wire the SQLite repositories onto an existing pool
    ///
    /// The schema is expected to be in place already.
    pub fn from_pool(pool: SqlitePool, worker_id: u16) -> Self {
        Self::new(
            pool.clone(),
            Arc::new(SqliteUserRepository::new(pool.clone())),
            Arc::new(SqliteSessionRepository::new(pool.clone())),
            Arc::new(SqliteConversationRepository::new(pool.clone())),
            Arc::new(SqliteMessageRepository::new(pool.clone())),
            Arc::new(SqliteReactionRepository::new(pool.clone())),
            Arc::new(SqliteGroupRepository::new(pool)),
            Arc::new(SnowflakeGenerator::new(worker_id)),
        )
    }

    /// Open the configured database, bootstrap the schema, and wire everything
    pub async fn connect(config: &AppConfig) -> ServiceResult<Self> {
        let pool = create_pool(&DatabaseConfig::from_settings(&config.database)).await?;
        migrate(&pool).await?;

        info!(
            app = %config.app.name,
            worker_id = config.snowflake.worker_id,
            "Service context ready"
        );

        Ok(Self::from_pool(pool, config.snowflake.worker_id))
    }

    /// Fresh in-memory database with the schema applied
    pub async fn in_memory() -> ServiceResult<Self> {
        let pool = create_pool(&DatabaseConfig::in_memory()).await?;
        migrate(&pool).await?;
        Ok(Self::from_pool(pool, 0))
    }

    // === Database Pool ===

    /// Get the SQLite connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn session_repo(&self) -> &dyn SessionRepository {
        self.session_repo.as_ref()
    }

    pub fn conversation_repo(&self) -> &dyn ConversationRepository {
        self.conversation_repo.as_ref()
    }

    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    pub fn group_repo(&self) -> &dyn GroupRepository {
        self.group_repo.as_ref()
    }

    // === Ids ===

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"SqlitePool")
            .field("repositories", &"...")
            .field("worker_id", &self.snowflake_generator.worker_id())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom repositories
///
/// Any repository left unset falls back to the SQLite implementation on the
/// builder's pool.
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<SqlitePool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    session_repo: Option<Arc<dyn SessionRepository>>,
    conversation_repo: Option<Arc<dyn ConversationRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    group_repo: Option<Arc<dyn GroupRepository>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: SqlitePool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn session_repo(mut self, repo: Arc<dyn SessionRepository>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    pub fn conversation_repo(mut self, repo: Arc<dyn ConversationRepository>) -> Self {
        self.conversation_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn group_repo(mut self, repo: Arc<dyn GroupRepository>) -> Self {
        self.group_repo = Some(repo);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if the pool is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let pool = self
            .pool
            .ok_or_else(|| ServiceError::validation("pool is required"))?;

        Ok(ServiceContext::new(
            pool.clone(),
            self.user_repo
                .unwrap_or_else(|| Arc::new(SqliteUserRepository::new(pool.clone()))),
            self.session_repo
                .unwrap_or_else(|| Arc::new(SqliteSessionRepository::new(pool.clone()))),
            self.conversation_repo
                .unwrap_or_else(|| Arc::new(SqliteConversationRepository::new(pool.clone()))),
            self.message_repo
                .unwrap_or_else(|| Arc::new(SqliteMessageRepository::new(pool.clone()))),
            self.reaction_repo
                .unwrap_or_else(|| Arc::new(SqliteReactionRepository::new(pool.clone()))),
            self.group_repo
                .unwrap_or_else(|| Arc::new(SqliteGroupRepository::new(pool))),
            self.snowflake_generator
                .unwrap_or_else(|| Arc::new(SnowflakeGenerator::new(0))),
        ))
    }
}
