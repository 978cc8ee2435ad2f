//! Group entity - the group view of a group-kind conversation

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::Snowflake;

/// Group entity
///
/// `id` is the id of the backing conversation, so a group id can be passed to
/// every conversation and message operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub id: Snowflake,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Member usernames
    pub members: Vec<String>,
}

impl Group {
    /// Check if a username is among the members
    pub fn has_member(&self, username: &str) -> bool {
        self.members.iter().any(|m| m == username)
    }

    /// Number of members, creator included
    #[inline]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_member() {
        let group = Group {
            id: Snowflake::new(1),
            name: "Team".to_string(),
            photo_url: None,
            created_at: Utc::now(),
            members: vec!["ana".to_string(), "luis".to_string()],
        };
        assert!(group.has_member("ana"));
        assert!(!group.has_member("eva"));
        assert_eq!(group.member_count(), 2);
    }
}
