//! Integration tests for messenger-db repositories
//!
//! Each test opens its own private in-memory SQLite database.
//!
//! ```bash
//! cargo test -p messenger-db --test integration_tests
//! ```

use messenger_core::entities::{Conversation, Message, MessageBody, Reaction, User, IMAGE_PREVIEW};
use messenger_core::error::{DomainError, ErrorKind};
use messenger_core::traits::{
    ConversationRepository, GroupRepository, MessageRepository, NewGroup, ReactionRepository,
    SessionRepository, UserRepository,
};
use messenger_core::value_objects::{Snowflake, SnowflakeGenerator};
use messenger_db::{
    create_pool, migrate, DatabaseConfig, SqliteConversationRepository, SqliteGroupRepository,
    SqliteMessageRepository, SqlitePool, SqliteReactionRepository, SqliteSessionRepository,
    SqliteUserRepository,
};

struct Store {
    pool: SqlitePool,
    ids: SnowflakeGenerator,
    users: SqliteUserRepository,
    sessions: SqliteSessionRepository,
    conversations: SqliteConversationRepository,
    messages: SqliteMessageRepository,
    reactions: SqliteReactionRepository,
    groups: SqliteGroupRepository,
}

impl Store {
    async fn open() -> Self {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        migrate(&pool).await.unwrap();
        Self {
            ids: SnowflakeGenerator::new(1),
            users: SqliteUserRepository::new(pool.clone()),
            sessions: SqliteSessionRepository::new(pool.clone()),
            conversations: SqliteConversationRepository::new(pool.clone()),
            messages: SqliteMessageRepository::new(pool.clone()),
            reactions: SqliteReactionRepository::new(pool.clone()),
            groups: SqliteGroupRepository::new(pool.clone()),
            pool,
        }
    }

    async fn user(&self, name: &str) -> User {
        let user = User::new(
            self.ids.generate(),
            name.to_string(),
            uuid::Uuid::new_v4().to_string(),
        );
        self.users.create(&user).await.unwrap();
        user
    }

    async fn direct(&self, initiator: &User, other: &User) -> Snowflake {
        let conversation = Conversation::new_direct(self.ids.generate());
        self.conversations
            .create_direct(&conversation, initiator.id, &other.username)
            .await
            .unwrap();
        conversation.id
    }

    async fn group(&self, name: &str, creator: &User, members: &[&User]) -> Snowflake {
        let new_group = NewGroup {
            conversation: Conversation::new_group(self.ids.generate(), name.to_string()),
            creator_id: creator.id,
            members: members.iter().map(|u| u.username.clone()).collect(),
        };
        self.groups.create(&new_group).await.unwrap().id
    }

    fn text(&self, conversation_id: Snowflake, sender: &User, text: &str) -> Message {
        Message::new(
            self.ids.generate(),
            conversation_id,
            sender.id,
            sender.username.clone(),
            MessageBody::Text(text.to_string()),
        )
    }

    async fn send(&self, conversation_id: Snowflake, sender: &User, text: &str) -> Message {
        self.messages
            .create(&self.text(conversation_id, sender, text))
            .await
            .unwrap()
    }

    async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

// ============================================================================
// Users and sessions
// ============================================================================

#[tokio::test]
async fn test_user_lookups() {
    let store = Store::open().await;
    let ana = store.user("ana").await;

    let by_id = store.users.find_by_id(ana.id).await.unwrap().unwrap();
    assert_eq!(by_id.username, "ana");
    let by_name = store.users.find_by_username("ana").await.unwrap().unwrap();
    assert_eq!(by_name.id, ana.id);
    let by_token = store.users.find_by_token(&ana.token).await.unwrap().unwrap();
    assert_eq!(by_token.id, ana.id);

    assert!(store.users.find_by_username("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_username_is_already_exists() {
    let store = Store::open().await;
    store.user("ana").await;

    let twin = User::new(store.ids.generate(), "ana".to_string(), "other".to_string());
    let err = store.users.create(&twin).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
}

#[tokio::test]
async fn test_login_creates_user_once() {
    let store = Store::open().await;

    let first = User::new(store.ids.generate(), "maria".to_string(), "t1".to_string());
    let (user, session) = store.sessions.login(&first, "s-1").await.unwrap();
    assert_eq!(user.id, first.id);
    assert_eq!(session.username, "maria");

    let second = User::new(store.ids.generate(), "maria".to_string(), "t2".to_string());
    let (again, _) = store.sessions.login(&second, "s-2").await.unwrap();
    assert_eq!(again.id, first.id);

    assert_eq!(store.count("users").await, 1);
    assert_eq!(store.sessions.find_by_user(first.id).await.unwrap().len(), 2);
    assert!(store.sessions.find("s-2").await.unwrap().is_some());
}

#[tokio::test]
async fn test_concurrent_first_logins_share_one_user() {
    let store = Store::open().await;
    let first = User::new(store.ids.generate(), "nina".to_string(), "t1".to_string());
    let second = User::new(store.ids.generate(), "nina".to_string(), "t2".to_string());

    let (a, b) = tokio::join!(
        store.sessions.login(&first, "s-1"),
        store.sessions.login(&second, "s-2"),
    );
    let (a, _) = a.unwrap();
    let (b, _) = b.unwrap();

    assert_eq!(a.id, b.id);
    assert_eq!(store.count("users").await, 1);
    assert_eq!(store.sessions.find_by_user(a.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_login_rejects_bad_username() {
    let store = Store::open().await;
    let candidate = User::new(store.ids.generate(), "no spaces".to_string(), "t".to_string());

    let err = store.sessions.login(&candidate, "s").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(store.count("users").await, 0);
    assert_eq!(store.count("sessions").await, 0);
}

#[tokio::test]
async fn test_update_photo() {
    let store = Store::open().await;
    let ana = store.user("ana").await;

    store
        .users
        .update_photo(ana.id, "/uploads/images/ana.png")
        .await
        .unwrap();
    let ana = store.users.find_by_id(ana.id).await.unwrap().unwrap();
    assert_eq!(ana.photo_or_empty(), "/uploads/images/ana.png");

    let err = store
        .users
        .update_photo(Snowflake::new(1), "/x.png")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

// ============================================================================
// Rename fan-out
// ============================================================================

#[tokio::test]
async fn test_rename_shows_new_name_on_every_historical_message() {
    let store = Store::open().await;
    let ana = store.user("ana").await;
    let luis = store.user("luis").await;
    let eva = store.user("eva").await;

    let direct = store.direct(&ana, &luis).await;
    let team = store.group("Team", &ana, &[&luis, &eva]).await;
    store.send(direct, &ana, "hola").await;
    store.send(direct, &luis, "hey").await;
    store.send(team, &ana, "standup?").await;
    let returning = User::new(store.ids.generate(), "ana".into(), "x".into());
    store.sessions.login(&returning, "s-ana").await.unwrap();

    store.users.rename(ana.id, "ana_maria").await.unwrap();

    for conversation in [direct, team] {
        let messages = store.messages.find_by_conversation(conversation).await.unwrap();
        for entry in messages.iter().filter(|m| m.message.sender_id == ana.id) {
            assert_eq!(entry.message.sender, "ana_maria");
        }
    }
    let session = store.sessions.find("s-ana").await.unwrap().unwrap();
    assert_eq!(session.username, "ana_maria");

    let detail = store.conversations.detail(team).await.unwrap();
    assert!(detail.participants.contains(&"ana_maria".to_string()));
    assert!(!detail.participants.contains(&"ana".to_string()));
}

#[tokio::test]
async fn test_rename_errors() {
    let store = Store::open().await;
    let ana = store.user("ana").await;
    store.user("luis").await;

    let same = store.users.rename(ana.id, "ana").await.unwrap_err();
    assert!(matches!(same, DomainError::SameUsername));

    let taken = store.users.rename(ana.id, "luis").await.unwrap_err();
    assert_eq!(taken.kind(), ErrorKind::AlreadyExists);

    let invalid = store.users.rename(ana.id, "x").await.unwrap_err();
    assert_eq!(invalid.kind(), ErrorKind::InvalidArgument);

    let missing = store.users.rename(Snowflake::new(99), "ghost").await.unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::NotFound);

    let ana = store.users.find_by_id(ana.id).await.unwrap().unwrap();
    assert_eq!(ana.username, "ana");
}

// ============================================================================
// Conversations
// ============================================================================

#[tokio::test]
async fn test_create_direct_conversation() {
    let store = Store::open().await;
    let ana = store.user("ana").await;
    let luis = store.user("luis").await;

    let id = store.direct(&ana, &luis).await;

    let conversation = store.conversations.find_by_id(id).await.unwrap().unwrap();
    assert!(!conversation.is_group());
    assert!(!conversation.has_messages());
    assert_eq!(conversation.last_activity_at, conversation.created_at);

    let detail = store.conversations.detail(id).await.unwrap();
    assert_eq!(detail.participants, vec!["ana", "luis"]);
    assert!(detail.name.is_none());
}

#[tokio::test]
async fn test_create_direct_rejects_unknown_or_self() {
    let store = Store::open().await;
    let ana = store.user("ana").await;

    let conversation = Conversation::new_direct(store.ids.generate());
    let unknown = store
        .conversations
        .create_direct(&conversation, ana.id, "ghost")
        .await
        .unwrap_err();
    assert_eq!(unknown.kind(), ErrorKind::InvalidArgument);

    let own = store
        .conversations
        .create_direct(&conversation, ana.id, "ana")
        .await
        .unwrap_err();
    assert_eq!(own.kind(), ErrorKind::InvalidArgument);

    assert_eq!(store.count("conversations").await, 0);
    assert_eq!(store.count("conversation_participants").await, 0);
}

#[tokio::test]
async fn test_is_participant_covers_direct_and_group() {
    let store = Store::open().await;
    let ana = store.user("ana").await;
    let luis = store.user("luis").await;
    let eva = store.user("eva").await;
    let outsider = store.user("outsider").await;

    let direct = store.direct(&ana, &luis).await;
    let team = store.group("Team", &ana, &[&luis, &eva]).await;

    let cases = [
        (direct, &ana, true),
        (direct, &luis, true),
        (direct, &eva, false),
        (team, &ana, true),
        (team, &eva, true),
        (team, &outsider, false),
    ];
    for (conversation, user, expected) in cases {
        assert_eq!(
            store
                .conversations
                .is_participant(conversation, user.id)
                .await
                .unwrap(),
            expected,
            "{} in {conversation}",
            user.username
        );
    }

    store.groups.remove_member(team, eva.id).await.unwrap();
    assert!(!store.conversations.is_participant(team, eva.id).await.unwrap());
}

#[tokio::test]
async fn test_list_conversations_ordering_and_previews() {
    let store = Store::open().await;
    let ana = store.user("ana").await;
    let luis = store.user("luis").await;
    let eva = store.user("eva").await;

    let with_luis = store.direct(&ana, &luis).await;
    let with_eva = store.direct(&ana, &eva).await;
    let team = store.group("Team", &ana, &[&luis, &eva]).await;

    store.send(with_luis, &luis, "first").await;
    let image = Message::new(
        store.ids.generate(),
        team,
        eva.id,
        eva.username.clone(),
        MessageBody::Image("/uploads/images/cat.png".to_string()),
    );
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    store.messages.create(&image).await.unwrap();

    let list = store.conversations.list_for_user(ana.id).await.unwrap();
    let ids: Vec<Snowflake> = list.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![team, with_luis, with_eva]);

    assert_eq!(list[0].name, "Team");
    assert_eq!(list[0].last_message, IMAGE_PREVIEW);
    assert_eq!(list[0].participants, vec!["ana", "luis", "eva"]);
    assert_eq!(list[1].name, "luis");
    assert_eq!(list[1].last_message, "first");
    assert_eq!(list[2].name, "eva");
    assert_eq!(list[2].last_message, "");

    let for_luis = store.conversations.list_for_user(luis.id).await.unwrap();
    assert_eq!(for_luis.len(), 2);
    assert!(for_luis.iter().any(|c| c.id == with_luis && c.name == "ana"));
}

#[tokio::test]
async fn test_latest_message_outranks_newer_empty_conversation() {
    let store = Store::open().await;
    let ana = store.user("ana").await;
    let luis = store.user("luis").await;
    let eva = store.user("eva").await;

    // No pauses: all three writes usually share one millisecond
    for _ in 0..20 {
        let older = store.direct(&ana, &luis).await;
        let newer_empty = store.direct(&ana, &eva).await;
        store.send(older, &ana, "hi").await;

        let list = store.conversations.list_for_user(ana.id).await.unwrap();
        assert_eq!(list[0].id, older);
        assert_eq!(list[0].last_message, "hi");
        assert_eq!(list[1].id, newer_empty);
    }
}

#[tokio::test]
async fn test_detail_of_missing_conversation_is_not_found() {
    let store = Store::open().await;
    let err = store.conversations.detail(Snowflake::new(5)).await.unwrap_err();
    assert!(matches!(err, DomainError::ConversationNotFound(_)));
}

// ============================================================================
// Messages
// ============================================================================

#[tokio::test]
async fn test_send_message_updates_preview() {
    let store = Store::open().await;
    let ana = store.user("ana").await;
    let luis = store.user("luis").await;
    let conversation = store.direct(&ana, &luis).await;

    let sent = store.send(conversation, &ana, "hello").await;
    assert_eq!(sent.sender, "ana");
    assert_eq!(sent.body.text(), Some("hello"));

    let stored = store
        .conversations
        .find_by_id(conversation)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.last_message, "hello");
    assert_eq!(
        stored.last_activity_at.timestamp_millis(),
        sent.created_at.timestamp_millis()
    );
}

#[tokio::test]
async fn test_send_to_missing_conversation_leaves_no_rows() {
    let store = Store::open().await;
    let ana = store.user("ana").await;

    let orphan = store.text(Snowflake::new(12345), &ana, "into the void");
    let err = store.messages.create(&orphan).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assert_eq!(store.count("messages").await, 0);
    assert_eq!(store.count("conversations").await, 0);
}

#[tokio::test]
async fn test_send_requires_participant_and_text() {
    let store = Store::open().await;
    let ana = store.user("ana").await;
    let luis = store.user("luis").await;
    let eva = store.user("eva").await;
    let conversation = store.direct(&ana, &luis).await;

    let intruder = store
        .messages
        .create(&store.text(conversation, &eva, "hi"))
        .await
        .unwrap_err();
    assert_eq!(intruder.kind(), ErrorKind::PermissionDenied);

    let blank = store
        .messages
        .create(&store.text(conversation, &ana, "   "))
        .await
        .unwrap_err();
    assert_eq!(blank.kind(), ErrorKind::InvalidArgument);

    assert_eq!(store.count("messages").await, 0);
}

#[tokio::test]
async fn test_reply_must_target_same_conversation() {
    let store = Store::open().await;
    let ana = store.user("ana").await;
    let luis = store.user("luis").await;
    let eva = store.user("eva").await;
    let first = store.direct(&ana, &luis).await;
    let second = store.direct(&ana, &eva).await;

    let parent = store.send(first, &luis, "question?").await;
    let elsewhere = store.send(second, &eva, "unrelated").await;

    let reply = Message::new_reply(
        store.ids.generate(),
        first,
        ana.id,
        ana.username.clone(),
        MessageBody::Text("answer".to_string()),
        parent.id,
    );
    let stored = store.messages.create(&reply).await.unwrap();
    assert_eq!(stored.reply_to, Some(parent.id));

    let cross = Message::new_reply(
        store.ids.generate(),
        first,
        ana.id,
        ana.username.clone(),
        MessageBody::Text("wrong thread".to_string()),
        elsewhere.id,
    );
    let err = store.messages.create(&cross).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidReplyTarget(id) if id == elsewhere.id));
}

#[tokio::test]
async fn test_forward_copies_body_and_leaves_source_untouched() {
    let store = Store::open().await;
    let ana = store.user("ana").await;
    let luis = store.user("luis").await;
    let eva = store.user("eva").await;
    let source_conv = store.direct(&ana, &luis).await;
    let target_conv = store.direct(&luis, &eva).await;

    let original = store
        .messages
        .create(&Message::new(
            store.ids.generate(),
            source_conv,
            ana.id,
            ana.username.clone(),
            MessageBody::Image("/uploads/images/meme.png".to_string()),
        ))
        .await
        .unwrap();

    let forwarded = store
        .messages
        .forward(original.id, store.ids.generate(), target_conv, luis.id)
        .await
        .unwrap();

    assert_ne!(forwarded.id, original.id);
    assert_eq!(forwarded.body, original.body);
    assert_eq!(forwarded.conversation_id, target_conv);
    assert_eq!(forwarded.sender, "luis");
    assert!(!forwarded.is_reply());

    let source_again = store.messages.find_by_id(original.id).await.unwrap().unwrap();
    assert_eq!(source_again, original);

    let target = store.conversations.find_by_id(target_conv).await.unwrap().unwrap();
    assert_eq!(target.last_message, IMAGE_PREVIEW);
}

#[tokio::test]
async fn test_forward_errors() {
    let store = Store::open().await;
    let ana = store.user("ana").await;
    let luis = store.user("luis").await;
    let eva = store.user("eva").await;
    let source_conv = store.direct(&ana, &luis).await;
    let foreign_conv = store.direct(&luis, &eva).await;
    let original = store.send(source_conv, &ana, "psst").await;

    let missing_original = store
        .messages
        .forward(Snowflake::new(1), store.ids.generate(), source_conv, ana.id)
        .await
        .unwrap_err();
    assert!(matches!(missing_original, DomainError::MessageNotFound(_)));

    let missing_target = store
        .messages
        .forward(original.id, store.ids.generate(), Snowflake::new(1), ana.id)
        .await
        .unwrap_err();
    assert!(matches!(missing_target, DomainError::ConversationNotFound(_)));

    let not_member = store
        .messages
        .forward(original.id, store.ids.generate(), foreign_conv, ana.id)
        .await
        .unwrap_err();
    assert_eq!(not_member.kind(), ErrorKind::PermissionDenied);

    assert_eq!(store.count("messages").await, 1);
}

#[tokio::test]
async fn test_delete_removes_message_and_reactions() {
    let store = Store::open().await;
    let ana = store.user("ana").await;
    let luis = store.user("luis").await;
    let conversation = store.direct(&ana, &luis).await;

    let keep = store.send(conversation, &ana, "keep me").await;
    let doomed = store.send(conversation, &ana, "delete me").await;
    for user in [&ana, &luis] {
        store
            .reactions
            .upsert(&Reaction::new(doomed.id, user.id, "👍".to_string()))
            .await
            .unwrap();
    }

    store.messages.delete(doomed.id).await.unwrap();

    let remaining = store.messages.find_by_conversation(conversation).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].message.id, keep.id);
    assert!(store.messages.find_by_id(doomed.id).await.unwrap().is_none());
    assert!(store.reactions.find_by_message(doomed.id).await.unwrap().is_empty());
    assert_eq!(store.count("reactions").await, 0);

    let err = store.messages.delete(doomed.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_recomputes_preview() {
    let store = Store::open().await;
    let ana = store.user("ana").await;
    let luis = store.user("luis").await;
    let conversation = store.direct(&ana, &luis).await;

    let older = store.send(conversation, &ana, "older").await;
    let newest = store.send(conversation, &luis, "newest").await;

    store.messages.delete(newest.id).await.unwrap();
    let stored = store.conversations.find_by_id(conversation).await.unwrap().unwrap();
    assert_eq!(stored.last_message, "older");
    assert_eq!(
        stored.last_activity_at.timestamp_millis(),
        older.created_at.timestamp_millis()
    );

    store.messages.delete(older.id).await.unwrap();
    let stored = store.conversations.find_by_id(conversation).await.unwrap().unwrap();
    assert_eq!(stored.last_message, "");
    assert_eq!(stored.last_activity_at, stored.created_at);
}

#[tokio::test]
async fn test_deleting_parent_detaches_replies() {
    let store = Store::open().await;
    let ana = store.user("ana").await;
    let luis = store.user("luis").await;
    let conversation = store.direct(&ana, &luis).await;

    let parent = store.send(conversation, &luis, "question?").await;
    let reply = Message::new_reply(
        store.ids.generate(),
        conversation,
        ana.id,
        ana.username.clone(),
        MessageBody::Text("answer".to_string()),
        parent.id,
    );
    store.messages.create(&reply).await.unwrap();

    store.messages.delete(parent.id).await.unwrap();

    let remaining = store.messages.find_by_conversation(conversation).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].message.id, reply.id);
    assert_eq!(remaining[0].message.reply_to, None);
    assert_eq!(remaining[0].message.body.text(), Some("answer"));

    let stored = store.messages.find_by_id(reply.id).await.unwrap().unwrap();
    assert_eq!(stored.reply_to, None);
}

#[tokio::test]
async fn test_messages_are_ordered_with_reactions_attached() {
    let store = Store::open().await;
    let ana = store.user("ana").await;
    let luis = store.user("luis").await;
    let conversation = store.direct(&ana, &luis).await;

    let first = store.send(conversation, &ana, "one").await;
    let second = store.send(conversation, &luis, "two").await;
    let third = store.send(conversation, &ana, "three").await;
    store
        .reactions
        .upsert(&Reaction::new(second.id, ana.id, "😂".to_string()))
        .await
        .unwrap();

    let messages = store.messages.find_by_conversation(conversation).await.unwrap();
    let ids: Vec<Snowflake> = messages.iter().map(|m| m.message.id).collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);
    assert!(messages[0].reactions.is_empty());
    assert_eq!(messages[1].reactions.len(), 1);
    assert_eq!(messages[1].reactions[0].emoji, "😂");

    let err = store
        .messages
        .find_by_conversation(Snowflake::new(3))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

// ============================================================================
// Reactions
// ============================================================================

#[tokio::test]
async fn test_reaction_upsert_keeps_one_per_user() {
    let store = Store::open().await;
    let ana = store.user("ana").await;
    let luis = store.user("luis").await;
    let conversation = store.direct(&ana, &luis).await;
    let message = store.send(conversation, &luis, "news").await;

    store
        .reactions
        .upsert(&Reaction::new(message.id, ana.id, "👍".to_string()))
        .await
        .unwrap();
    store
        .reactions
        .upsert(&Reaction::new(message.id, ana.id, "❤️".to_string()))
        .await
        .unwrap();

    let reactions = store.reactions.find_by_message(message.id).await.unwrap();
    assert_eq!(reactions.len(), 1);
    assert_eq!(reactions[0].emoji, "❤️");
    assert_eq!(reactions[0].user_id, ana.id);

    let listed = store.messages.find_by_conversation(conversation).await.unwrap();
    assert_eq!(listed[0].reaction_of(ana.id).map(|r| r.emoji.as_str()), Some("❤️"));
    assert!(listed[0].reaction_of(luis.id).is_none());
}

#[tokio::test]
async fn test_remove_reaction_is_not_idempotent() {
    let store = Store::open().await;
    let ana = store.user("ana").await;
    let luis = store.user("luis").await;
    let conversation = store.direct(&ana, &luis).await;
    let message = store.send(conversation, &luis, "news").await;

    let missing = store.reactions.delete(message.id, ana.id).await.unwrap_err();
    assert!(matches!(missing, DomainError::ReactionNotFound));

    store
        .reactions
        .upsert(&Reaction::new(message.id, ana.id, "👍".to_string()))
        .await
        .unwrap();
    store.reactions.delete(message.id, ana.id).await.unwrap();
    assert!(store.reactions.find(message.id, ana.id).await.unwrap().is_none());

    let again = store.reactions.delete(message.id, ana.id).await.unwrap_err();
    assert!(again.is_not_found());
}

#[tokio::test]
async fn test_reaction_validation() {
    let store = Store::open().await;
    let ana = store.user("ana").await;
    let luis = store.user("luis").await;
    let conversation = store.direct(&ana, &luis).await;
    let message = store.send(conversation, &luis, "news").await;

    let too_long = store
        .reactions
        .upsert(&Reaction::new(message.id, ana.id, "abcdef".to_string()))
        .await
        .unwrap_err();
    assert_eq!(too_long.kind(), ErrorKind::InvalidArgument);

    let empty = store
        .reactions
        .upsert(&Reaction::new(message.id, ana.id, String::new()))
        .await
        .unwrap_err();
    assert_eq!(empty.kind(), ErrorKind::InvalidArgument);

    let no_message = store
        .reactions
        .upsert(&Reaction::new(Snowflake::new(8), ana.id, "👍".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(no_message, DomainError::MessageNotFound(_)));
}

// ============================================================================
// Groups
// ============================================================================

#[tokio::test]
async fn test_create_group_has_creator_and_members() {
    let store = Store::open().await;
    let creator = store.user("creator").await;
    let alice = store.user("alice").await;
    let bob = store.user("bob").await;

    let id = store.group("Team", &creator, &[&alice, &bob]).await;

    let group = store.groups.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(group.name, "Team");
    assert_eq!(group.member_count(), 3);
    for name in ["creator", "alice", "bob"] {
        assert!(group.has_member(name));
    }

    let detail = store.conversations.detail(id).await.unwrap();
    assert_eq!(detail.name.as_deref(), Some("Team"));
    assert_eq!(detail.participants.len(), 3);
}

#[tokio::test]
async fn test_create_group_rejections_write_nothing() {
    let store = Store::open().await;
    let creator = store.user("creator").await;
    store.user("alice").await;
    store.user("bob").await;

    let attempt = |name: &str, members: &[&str]| NewGroup {
        conversation: Conversation::new_group(store.ids.generate(), name.to_string()),
        creator_id: creator.id,
        members: members.iter().map(ToString::to_string).collect(),
    };

    let empty = store.groups.create(&attempt("Team", &[])).await.unwrap_err();
    assert_eq!(empty.kind(), ErrorKind::InvalidArgument);

    let unnamed = store
        .groups
        .create(&attempt("", &["alice", "bob"]))
        .await
        .unwrap_err();
    assert_eq!(unnamed.kind(), ErrorKind::InvalidArgument);

    let duplicate = store
        .groups
        .create(&attempt("Team", &["alice", "alice"]))
        .await
        .unwrap_err();
    assert_eq!(duplicate.kind(), ErrorKind::InvalidArgument);

    let with_creator = store
        .groups
        .create(&attempt("Team", &["alice", "creator"]))
        .await
        .unwrap_err();
    assert_eq!(with_creator.kind(), ErrorKind::InvalidArgument);

    let unknown = store
        .groups
        .create(&attempt("Team", &["alice", "ghost"]))
        .await
        .unwrap_err();
    assert!(matches!(unknown, DomainError::UsernameNotFound(ref n) if n == "ghost"));

    assert_eq!(store.count("conversations").await, 0);
    assert_eq!(store.count("conversation_participants").await, 0);
}

#[tokio::test]
async fn test_update_group_attributes() {
    let store = Store::open().await;
    let creator = store.user("creator").await;
    let alice = store.user("alice").await;
    let bob = store.user("bob").await;
    let id = store.group("Team", &creator, &[&alice, &bob]).await;

    store.groups.update_name(id, "Core Team").await.unwrap();
    store
        .groups
        .update_photo(id, "/uploads/images/team.png")
        .await
        .unwrap();

    let group = store.groups.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(group.name, "Core Team");
    assert_eq!(group.photo_url.as_deref(), Some("/uploads/images/team.png"));

    let blank = store.groups.update_name(id, "").await.unwrap_err();
    assert_eq!(blank.kind(), ErrorKind::InvalidArgument);
    let missing = store
        .groups
        .update_name(Snowflake::new(77), "Other")
        .await
        .unwrap_err();
    assert!(matches!(missing, DomainError::GroupNotFound(_)));
}

#[tokio::test]
async fn test_direct_conversation_is_not_a_group() {
    let store = Store::open().await;
    let ana = store.user("ana").await;
    let luis = store.user("luis").await;
    let direct = store.direct(&ana, &luis).await;

    assert!(store.groups.find_by_id(direct).await.unwrap().is_none());
    let err = store.groups.update_name(direct, "Renamed").await.unwrap_err();
    assert!(err.is_not_found());
    let err = store.groups.remove_member(direct, ana.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_leave_group_until_empty() {
    let store = Store::open().await;
    let creator = store.user("creator").await;
    let alice = store.user("alice").await;
    let bob = store.user("bob").await;
    let id = store.group("Team", &creator, &[&alice, &bob]).await;

    for user in [&creator, &alice, &bob] {
        store.groups.remove_member(id, user.id).await.unwrap();
    }

    let group = store.groups.find_by_id(id).await.unwrap().unwrap();
    assert!(group.members.is_empty());

    let err = store.groups.remove_member(id, alice.id).await.unwrap_err();
    assert!(matches!(err, DomainError::MembershipNotFound));
}
