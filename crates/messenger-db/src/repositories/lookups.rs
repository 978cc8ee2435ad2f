//! Queries shared by several repositories
//!
//! Every helper runs on a borrowed connection so callers can use it inside
//! their own transaction.

use sqlx::SqliteConnection;

use messenger_core::entities::Message;
use messenger_core::traits::RepoResult;
use messenger_core::value_objects::Snowflake;

use crate::mappers::{to_millis, MessageInsert};
use crate::models::MessageModel;

use super::error::map_db_error;

pub async fn conversation_exists(conn: &mut SqliteConnection, id: Snowflake) -> RepoResult<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM conversations WHERE id = ?1)")
        .bind(id.into_inner())
        .fetch_one(&mut *conn)
        .await
        .map_err(map_db_error)
}

pub async fn user_exists(conn: &mut SqliteConnection, id: Snowflake) -> RepoResult<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)")
        .bind(id.into_inner())
        .fetch_one(&mut *conn)
        .await
        .map_err(map_db_error)
}

pub async fn is_participant(
    conn: &mut SqliteConnection,
    conversation_id: Snowflake,
    user_id: Snowflake,
) -> RepoResult<bool> {
    sqlx::query_scalar::<_, bool>(
        r"
        SELECT EXISTS(
            SELECT 1 FROM conversation_participants
            WHERE conversation_id = ?1 AND user_id = ?2
        )
        ",
    )
    .bind(conversation_id.into_inner())
    .bind(user_id.into_inner())
    .fetch_one(&mut *conn)
    .await
    .map_err(map_db_error)
}

pub async fn user_id_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> RepoResult<Option<Snowflake>> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE username = ?1")
        .bind(username)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_db_error)?;

    Ok(id.map(Snowflake::new))
}

/// Participant usernames in join order
pub async fn participant_usernames(
    conn: &mut SqliteConnection,
    conversation_id: Snowflake,
) -> RepoResult<Vec<String>> {
    sqlx::query_scalar::<_, String>(
        r"
        SELECT u.username
        FROM conversation_participants cp
        JOIN users u ON u.id = cp.user_id
        WHERE cp.conversation_id = ?1
        ORDER BY cp.joined_at, cp.rowid
        ",
    )
    .bind(conversation_id.into_inner())
    .fetch_all(&mut *conn)
    .await
    .map_err(map_db_error)
}

pub async fn add_participant(
    conn: &mut SqliteConnection,
    conversation_id: Snowflake,
    user_id: Snowflake,
    joined_at: i64,
) -> RepoResult<()> {
    sqlx::query(
        r"
        INSERT INTO conversation_participants (conversation_id, user_id, joined_at)
        VALUES (?1, ?2, ?3)
        ",
    )
    .bind(conversation_id.into_inner())
    .bind(user_id.into_inner())
    .bind(joined_at)
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

/// Load a message with its sender's current username
pub async fn fetch_message(
    conn: &mut SqliteConnection,
    id: Snowflake,
) -> RepoResult<Option<Message>> {
    let result = sqlx::query_as::<_, MessageModel>(
        r"
        SELECT m.id, m.conversation_id, m.sender_id, u.username AS sender,
               m.content, m.image_url, m.reply_to, m.created_at
        FROM messages m
        JOIN users u ON u.id = m.sender_id
        WHERE m.id = ?1
        ",
    )
    .bind(id.into_inner())
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(result.map(Message::from))
}

/// Insert a message row and make it the conversation's preview
pub async fn insert_message(conn: &mut SqliteConnection, message: &Message) -> RepoResult<()> {
    let insert = MessageInsert::new(message);

    sqlx::query(
        r"
        INSERT INTO messages (id, conversation_id, sender_id, content, image_url, reply_to, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        ",
    )
    .bind(insert.id)
    .bind(insert.conversation_id)
    .bind(insert.sender_id)
    .bind(insert.content)
    .bind(insert.image_url)
    .bind(insert.reply_to)
    .bind(insert.created_at)
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    sqlx::query(
        r"
        UPDATE conversations
        SET last_message = ?2, last_activity_at = ?3
        WHERE id = ?1
        ",
    )
    .bind(insert.conversation_id)
    .bind(message.preview())
    .bind(to_millis(message.created_at))
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

/// Recompute the cached preview from the newest remaining message
///
/// With no messages left the preview is empty and activity falls back to
/// the creation time.
pub async fn refresh_preview(
    conn: &mut SqliteConnection,
    conversation_id: Snowflake,
) -> RepoResult<()> {
    sqlx::query(
        r"
        UPDATE conversations
        SET last_message = COALESCE((
                SELECT CASE WHEN m.content IS NOT NULL THEN m.content ELSE ?2 END
                FROM messages m
                WHERE m.conversation_id = conversations.id
                ORDER BY m.created_at DESC, m.id DESC
                LIMIT 1
            ), ''),
            last_activity_at = COALESCE((
                SELECT MAX(m.created_at)
                FROM messages m
                WHERE m.conversation_id = conversations.id
            ), created_at)
        WHERE id = ?1
        ",
    )
    .bind(conversation_id.into_inner())
    .bind(messenger_core::IMAGE_PREVIEW)
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(())
}
