/**
 * Group Directory
 *
 * This module owns group records: creation, lookup by name, and listing the
 * users affiliated with a group. Membership changes go through the join
 * coordinator, never through here.
 */

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::store::{NewGroup, Store, StoreError, GROUPS_NAME_KEY};
use crate::shared::error::require;
use crate::shared::{Group, SharedError, User};

/// Errors returned by `GroupDirectory`
#[derive(Debug, Error)]
pub enum GroupDirectoryError {
    #[error(transparent)]
    Validation(#[from] SharedError),

    #[error("group '{name}' already exists")]
    DuplicateName { name: String },

    #[error("group '{name}' not found")]
    NotFound { name: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Directory of groups
#[derive(Clone)]
pub struct GroupDirectory {
    store: Arc<dyn Store>,
}

impl GroupDirectory {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Create an empty group
    pub async fn create_group(&self, name: String) -> Result<Group, GroupDirectoryError> {
        require("name", &name)?;

        let new_group = NewGroup {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
        };
        let name = new_group.name.clone();

        match self.store.insert_group(new_group).await {
            Ok(group) => {
                tracing::info!("Group created: {} ({})", group.name, group.id);
                Ok(group)
            }
            Err(err) if err.is_duplicate_of(GROUPS_NAME_KEY) => {
                tracing::warn!("Group name already exists: {}", name);
                Err(GroupDirectoryError::DuplicateName { name })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Look up a group by name
    pub async fn find_by_name(&self, name: &str) -> Result<Group, GroupDirectoryError> {
        require("group_name", name)?;

        self.store
            .find_group_by_name(name)
            .await?
            .ok_or_else(|| GroupDirectoryError::NotFound {
                name: name.to_string(),
            })
    }

    /// Users whose affiliation points at the named group
    pub async fn list_members(&self, group_name: &str) -> Result<Vec<User>, GroupDirectoryError> {
        let group = self.find_by_name(group_name).await?;
        Ok(self.store.list_users_in_group(group.id).await?)
    }
}
