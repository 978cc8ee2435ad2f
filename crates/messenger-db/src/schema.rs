//! Schema bootstrap
//!
//! All statements are idempotent, so running the bootstrap against an
//! existing database is a no-op. Timestamps are INTEGER milliseconds since
//! the Unix epoch.

use sqlx::SqlitePool;
use tracing::info;

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id          INTEGER PRIMARY KEY,
    username    TEXT NOT NULL UNIQUE,
    token       TEXT NOT NULL UNIQUE,
    photo_url   TEXT,
    created_at  INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS sessions (
    identifier  TEXT PRIMARY KEY,
    user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    username    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_sessions_user
    ON sessions(user_id);

CREATE TABLE IF NOT EXISTS conversations (
    id                INTEGER PRIMARY KEY,
    kind              TEXT NOT NULL CHECK (kind IN ('direct', 'group')),
    name              TEXT,
    photo_url         TEXT,
    last_message      TEXT NOT NULL DEFAULT '',
    last_activity_at  INTEGER NOT NULL,
    created_at        INTEGER NOT NULL,
    CHECK (kind = 'group' OR (name IS NULL AND photo_url IS NULL))
);

CREATE TABLE IF NOT EXISTS conversation_participants (
    conversation_id  INTEGER NOT NULL REFERENCES conversations(id) ON DELETE CASCADE,
    user_id          INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    joined_at        INTEGER NOT NULL,
    PRIMARY KEY (conversation_id, user_id)
);

CREATE INDEX IF NOT EXISTS idx_participants_user
    ON conversation_participants(user_id);

CREATE TABLE IF NOT EXISTS messages (
    id               INTEGER PRIMARY KEY,
    conversation_id  INTEGER NOT NULL REFERENCES conversations(id) ON DELETE CASCADE,
    sender_id        INTEGER NOT NULL REFERENCES users(id),
    content          TEXT,
    image_url        TEXT,
    reply_to         INTEGER REFERENCES messages(id) ON DELETE SET NULL,
    created_at       INTEGER NOT NULL,
    CHECK ((content IS NULL) <> (image_url IS NULL))
);

CREATE INDEX IF NOT EXISTS idx_messages_conversation
    ON messages(conversation_id, created_at, id);

CREATE TABLE IF NOT EXISTS reactions (
    message_id  INTEGER NOT NULL REFERENCES messages(id) ON DELETE CASCADE,
    user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    emoji       TEXT NOT NULL CHECK (length(emoji) BETWEEN 1 AND 5),
    created_at  INTEGER NOT NULL,
    PRIMARY KEY (message_id, user_id)
);
";

/// Create every table and index that does not exist yet
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    info!("Database schema ready");
    Ok(())
}
