//! Group service
//!
//! Handles group creation, membership and group profile updates. A group id
//! is also a conversation id.

use messenger_core::entities::{Conversation, Group};
use messenger_core::traits::NewGroup;
use messenger_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::GroupResponse;

use super::context::ServiceContext;
use super::conversation::ConversationService;
use super::error::{ServiceError, ServiceResult};

/// Group service
pub struct GroupService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GroupService<'a> {
    /// Create a new GroupService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a group owned by `creator_id` with the listed members
    ///
    /// `members` holds usernames and excludes the creator, who is added
    /// automatically.
    #[instrument(skip(self, members), fields(members = members.len()))]
    pub async fn create_group(
        &self,
        name: &str,
        creator_id: Snowflake,
        members: Vec<String>,
    ) -> ServiceResult<GroupResponse> {
        let new_group = NewGroup {
            conversation: Conversation::new_group(self.ctx.generate_id(), name.to_string()),
            creator_id,
            members,
        };

        let group = self.ctx.group_repo().create(&new_group).await?;

        info!(
            group_id = %group.id,
            creator_id = %creator_id,
            members = group.member_count(),
            "Group created"
        );

        Ok(GroupResponse::from(group))
    }

    /// Get group by ID
    #[instrument(skip(self))]
    pub async fn get_group(&self, group_id: Snowflake) -> ServiceResult<GroupResponse> {
        self.get_group_entity(group_id).await.map(GroupResponse::from)
    }

    /// Get group entity by ID
    pub async fn get_group_entity(&self, group_id: Snowflake) -> ServiceResult<Group> {
        self.ctx
            .group_repo()
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Group", group_id))
    }

    /// Rename a group; the actor must be a member
    #[instrument(skip(self))]
    pub async fn update_name(
        &self,
        group_id: Snowflake,
        actor_id: Snowflake,
        name: &str,
    ) -> ServiceResult<GroupResponse> {
        self.require_member(group_id, actor_id).await?;

        self.ctx.group_repo().update_name(group_id, name).await?;

        info!(group_id = %group_id, name = %name, "Group renamed");

        self.get_group(group_id).await
    }

    /// Replace the group photo; the actor must be a member
    #[instrument(skip(self))]
    pub async fn update_photo(
        &self,
        group_id: Snowflake,
        actor_id: Snowflake,
        photo_url: &str,
    ) -> ServiceResult<GroupResponse> {
        self.require_member(group_id, actor_id).await?;

        self.ctx.group_repo().update_photo(group_id, photo_url).await?;

        info!(group_id = %group_id, "Group photo updated");

        self.get_group(group_id).await
    }

    /// Leave a group
    ///
    /// The group keeps existing even after its last member leaves.
    #[instrument(skip(self))]
    pub async fn leave(&self, group_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        self.ctx.group_repo().remove_member(group_id, user_id).await?;

        info!(group_id = %group_id, user_id = %user_id, "Member left group");

        Ok(())
    }

    async fn require_member(&self, group_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        if self.ctx.group_repo().find_by_id(group_id).await?.is_none() {
            return Err(DomainError::GroupNotFound(group_id).into());
        }

        ConversationService::new(self.ctx)
            .require_participant(group_id, user_id)
            .await
    }
}
