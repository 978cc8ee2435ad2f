//! Input rules shared by the store and service layers
//!
//! Every check returns the `DomainError` the operation must fail with, so the
//! store can re-validate independently of whatever the HTTP tier already did.

use std::collections::HashSet;

use crate::error::DomainError;

/// Username length bounds, in characters
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 16;

/// Reaction length bounds, in characters
pub const REACTION_MIN_LEN: usize = 1;
pub const REACTION_MAX_LEN: usize = 5;

/// Members a new group needs besides its creator
pub const GROUP_MIN_MEMBERS: usize = 2;
pub const GROUP_MAX_MEMBERS: usize = 50;

/// Usernames are 3-16 characters of `[A-Za-z0-9_-]`
pub fn validate_username(name: &str) -> Result<(), DomainError> {
    let len = name.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(DomainError::InvalidUsername(format!(
            "must be between {USERNAME_MIN_LEN} and {USERNAME_MAX_LEN} characters"
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(DomainError::InvalidUsername(
            "only letters, digits, '_' and '-' are allowed".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_reaction(emoji: &str) -> Result<(), DomainError> {
    let len = emoji.chars().count();
    if (REACTION_MIN_LEN..=REACTION_MAX_LEN).contains(&len) {
        Ok(())
    } else {
        Err(DomainError::InvalidReaction {
            min: REACTION_MIN_LEN,
            max: REACTION_MAX_LEN,
        })
    }
}

pub fn validate_text(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::ValidationError(
            "message content is required".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_image_ref(url: &str) -> Result<(), DomainError> {
    if url.trim().is_empty() {
        return Err(DomainError::ValidationError(
            "image reference is required".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_group_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::ValidationError(
            "group name is required".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_photo_url(url: &str) -> Result<(), DomainError> {
    if url.trim().is_empty() {
        return Err(DomainError::ValidationError(
            "photo URL is required".to_string(),
        ));
    }
    Ok(())
}

/// Checks the invited member list of a new group (creator excluded)
pub fn validate_group_members(members: &[String]) -> Result<(), DomainError> {
    if !(GROUP_MIN_MEMBERS..=GROUP_MAX_MEMBERS).contains(&members.len()) {
        return Err(DomainError::GroupSizeOutOfRange {
            min: GROUP_MIN_MEMBERS,
            max: GROUP_MAX_MEMBERS,
            actual: members.len(),
        });
    }

    let mut seen = HashSet::with_capacity(members.len());
    for member in members {
        if !seen.insert(member.as_str()) {
            return Err(DomainError::ValidationError(format!(
                "'{member}' is listed more than once"
            )));
        }
    }
    Ok(())
}
