//! SQLite connection pool management

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Database configuration for connection pool
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Maximum time to wait for a connection
    pub acquire_timeout: Duration,
    /// Maximum idle time before a connection is closed, `None` keeps it open
    pub idle_timeout: Option<Duration>,
    /// Maximum lifetime of a connection, `None` keeps it open
    pub max_lifetime: Option<Duration>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from("sqlite://messenger.db?mode=rwc"),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(10),
            idle_timeout: Some(Duration::from_secs(300)),
            max_lifetime: Some(Duration::from_secs(1800)),
        }
    }
}

impl DatabaseConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self, messenger_common::ConfigError> {
        let config = messenger_common::AppConfig::from_env()?;
        Ok(Self::from_settings(&config.database))
    }

    /// Create config from the application settings
    pub fn from_settings(settings: &messenger_common::DatabaseConfig) -> Self {
        Self {
            url: settings.url.clone(),
            max_connections: settings.max_connections,
            min_connections: settings.min_connections,
            ..Default::default()
        }
    }

    /// Private in-memory database
    ///
    /// Every connection to `sqlite::memory:` opens a different database, so
    /// the pool is pinned to a single connection that is never recycled.
    pub fn in_memory() -> Self {
        Self {
            url: String::from("sqlite::memory:"),
            max_connections: 1,
            min_connections: 1,
            idle_timeout: None,
            max_lifetime: None,
            ..Default::default()
        }
    }
}

/// Create a new SQLite connection pool
///
/// Foreign keys are enforced on every connection; reaction cleanup on
/// message deletion relies on it.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(config.acquire_timeout);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
        .connect_with(options)
        .await
}

/// Create a connection pool from the DATABASE_URL environment variable
pub async fn create_pool_from_env() -> Result<SqlitePool, sqlx::Error> {
    let config =
        DatabaseConfig::from_env().map_err(|e| sqlx::Error::Configuration(Box::new(e)))?;
    create_pool(&config).await
}
