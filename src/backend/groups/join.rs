/**
 * Group Join Coordinator
 *
 * Moves a user into a group by updating both sides of the membership
 * relation inside one store transaction:
 *
 * 1. Fetch the group's identity by name
 * 2. Fetch the user's id by username
 * 3. Point the user at the group (`group_name`, `group_id`, `updated_at`)
 * 4. Add the user to the group's `members` set (`updated_at`)
 * 5. Commit
 *
 * Each step feeds the next, so they run strictly in order. Any failure
 * rolls the transaction back: a reader sees either both sides updated or
 * neither. Joining a group twice is harmless; the member set does not grow.
 *
 * Leaving a previous group is not part of a join. A user who joins a second
 * group points at the new group and stays listed in the old group's members.
 *
 * The whole transaction runs under a deadline. When it expires the
 * transaction is dropped uncommitted and the caller gets a timeout.
 */

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::store::{Store, StoreError, StoreTransaction};
use crate::shared::error::require;
use crate::shared::SharedError;

/// Errors returned by `JoinCoordinator::join`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    #[error(transparent)]
    Validation(#[from] SharedError),

    #[error("group '{name}' not found")]
    GroupNotFound { name: String },

    #[error("user '{username}' not found")]
    UserNotFound { username: String },

    /// The user was found in step 2 but the update in step 3 matched nothing
    #[error("user document {user_id} vanished before update")]
    UserDocumentNotFound { user_id: Uuid },

    /// The group was found in step 1 but the update in step 4 matched nothing
    #[error("group document {group_id} vanished before update")]
    GroupDocumentNotFound { group_id: Uuid },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl JoinError {
    /// True for failures that mean a record disappeared mid-transaction
    pub fn is_inconsistent_state(&self) -> bool {
        matches!(
            self,
            Self::UserDocumentNotFound { .. } | Self::GroupDocumentNotFound { .. }
        )
    }
}

/// The affiliation established by a successful join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub user_id: Uuid,
    pub group_id: Uuid,
    pub group_name: String,
}

/// Runs the atomic join
#[derive(Clone)]
pub struct JoinCoordinator {
    store: Arc<dyn Store>,
    deadline: Duration,
}

impl JoinCoordinator {
    pub fn new(store: Arc<dyn Store>, deadline: Duration) -> Self {
        Self { store, deadline }
    }

    /// Add `username` to `group_name`, updating both records or neither
    pub async fn join(&self, username: &str, group_name: &str) -> Result<Membership, JoinError> {
        require("username", username)?;
        require("group_name", group_name)?;

        match tokio::time::timeout(self.deadline, self.run(username, group_name)).await {
            Ok(result) => result,
            // Logged once, where the HTTP layer converts the store error.
            Err(_) => Err(StoreError::Timeout.into()),
        }
    }

    async fn run(&self, username: &str, group_name: &str) -> Result<Membership, JoinError> {
        let mut tx = self.store.begin().await?;

        match apply(tx.as_mut(), username, group_name).await {
            Ok(membership) => {
                tx.commit().await?;
                tracing::info!(
                    "User '{}' ({}) joined group '{}' ({})",
                    username,
                    membership.user_id,
                    membership.group_name,
                    membership.group_id
                );
                Ok(membership)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!("Rollback after failed join also failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }
}

async fn apply(
    tx: &mut dyn StoreTransaction,
    username: &str,
    group_name: &str,
) -> Result<Membership, JoinError> {
    let group = tx
        .find_group_ref(group_name)
        .await?
        .ok_or_else(|| JoinError::GroupNotFound {
            name: group_name.to_string(),
        })?;

    let user = tx
        .find_user_ref(username)
        .await?
        .ok_or_else(|| JoinError::UserNotFound {
            username: username.to_string(),
        })?;

    let now = Utc::now();

    if tx.assign_user_group(user.id, &group, now).await? == 0 {
        return Err(JoinError::UserDocumentNotFound { user_id: user.id });
    }

    if tx.add_group_member(group.id, user.id, now).await? == 0 {
        return Err(JoinError::GroupDocumentNotFound { group_id: group.id });
    }

    Ok(Membership {
        user_id: user.id,
        group_id: group.id,
        group_name: group.name,
    })
}
