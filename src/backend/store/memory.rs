/**
 * In-Memory Store
 *
 * A `Store` held entirely in process memory. It backs the unit and
 * integration test suites; the server binary always runs on `PgStore`.
 *
 * # Transactions
 *
 * `begin` takes the store lock for the lifetime of the transaction and works
 * on a private copy of the data. `commit` swaps the copy in; `rollback` or a
 * plain drop throws it away. Transactions are therefore fully serialised and
 * all-or-nothing, which is stronger than what the join needs.
 *
 * # Fault Injection
 *
 * `inject_fault` queues a failure for the next transaction write that reaches
 * the matching step, so tests can exercise the rollback paths that a live
 * database only hits under races.
 */

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::backend::store::{
    GroupRef, NewGroup, NewUser, Store, StoreError, StoreResult, StoreTransaction, UserRef,
    GROUPS_NAME_KEY, USERS_PHONE_NUMBER_KEY, USERS_USERNAME_KEY,
};
use crate::shared::user::rank_by_score;
use crate::shared::{Group, Standing, User};

/// A failure to inject into the next transaction that reaches it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// `assign_user_group` matches no record
    UserUpdateMatchesNothing,
    /// `add_group_member` matches no record
    GroupUpdateMatchesNothing,
    /// `add_group_member` fails with a backend error
    GroupUpdateFails,
}

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    // Kept to mirror the real table; never read back out.
    #[allow(dead_code)]
    password_hash: String,
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    users: Vec<StoredUser>,
    groups: Vec<Group>,
}

impl MemoryState {
    fn user_mut(&mut self, id: Uuid) -> Option<&mut User> {
        self.users
            .iter_mut()
            .map(|stored| &mut stored.user)
            .find(|user| user.id == id)
    }

    fn group_mut(&mut self, id: Uuid) -> Option<&mut Group> {
        self.groups.iter_mut().find(|group| group.id == id)
    }
}

/// `Store` implementation over process memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    faults: Arc<Mutex<VecDeque<Fault>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a fault; faults fire in the order they were injected
    pub async fn inject_fault(&self, fault: Fault) {
        self.faults.lock().await.push_back(fault);
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, new_user: NewUser) -> StoreResult<User> {
        let mut state = self.state.lock().await;

        if state.users.iter().any(|s| s.user.username == new_user.username) {
            return Err(StoreError::duplicate_key(USERS_USERNAME_KEY));
        }
        if state.users.iter().any(|s| s.user.phone_number == new_user.phone_number) {
            return Err(StoreError::duplicate_key(USERS_PHONE_NUMBER_KEY));
        }

        let user = User {
            id: new_user.id,
            username: new_user.username,
            display_name: new_user.display_name,
            phone_number: new_user.phone_number,
            score: new_user.score,
            standing: Standing::from_score(new_user.score),
            group_name: String::new(),
            group_id: None,
            created_at: new_user.created_at,
            updated_at: new_user.created_at,
        };
        state.users.push(StoredUser {
            user: user.clone(),
            password_hash: new_user.password_hash.as_str().to_string(),
        });

        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .iter()
            .find(|s| s.user.username == username)
            .map(|s| s.user.clone()))
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let state = self.state.lock().await;
        Ok(state.users.iter().map(|s| s.user.clone()).collect())
    }

    async fn list_users_by_score(&self) -> StoreResult<Vec<User>> {
        let mut users = self.list_users().await?;
        rank_by_score(&mut users);
        Ok(users)
    }

    async fn list_users_in_group(&self, group_id: Uuid) -> StoreResult<Vec<User>> {
        let state = self.state.lock().await;
        let mut users: Vec<User> = state
            .users
            .iter()
            .filter(|s| s.user.group_id == Some(group_id))
            .map(|s| s.user.clone())
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn insert_group(&self, new_group: NewGroup) -> StoreResult<Group> {
        let mut state = self.state.lock().await;

        if state.groups.iter().any(|g| g.name == new_group.name) {
            return Err(StoreError::duplicate_key(GROUPS_NAME_KEY));
        }

        let group = Group {
            id: new_group.id,
            name: new_group.name,
            members: Vec::new(),
            created_at: new_group.created_at,
            updated_at: new_group.created_at,
        };
        state.groups.push(group.clone());

        Ok(group)
    }

    async fn find_group_by_name(&self, name: &str) -> StoreResult<Option<Group>> {
        let state = self.state.lock().await;
        Ok(state.groups.iter().find(|g| g.name == name).cloned())
    }

    async fn begin(&self) -> StoreResult<Box<dyn StoreTransaction>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryTransaction {
            guard,
            staged,
            faults: Arc::clone(&self.faults),
        }))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn close(&self) {}
}

/// Transaction over a private copy of the store
struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    staged: MemoryState,
    faults: Arc<Mutex<VecDeque<Fault>>>,
}

impl MemoryTransaction {
    /// Pop the next queued fault if it is one of `wanted`
    async fn take_fault(&self, wanted: &[Fault]) -> Option<Fault> {
        let mut faults = self.faults.lock().await;
        match faults.front() {
            Some(fault) if wanted.contains(fault) => faults.pop_front(),
            _ => None,
        }
    }
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn find_group_ref(&mut self, name: &str) -> StoreResult<Option<GroupRef>> {
        Ok(self
            .staged
            .groups
            .iter()
            .find(|g| g.name == name)
            .map(|g| GroupRef {
                id: g.id,
                name: g.name.clone(),
            }))
    }

    async fn find_user_ref(&mut self, username: &str) -> StoreResult<Option<UserRef>> {
        Ok(self
            .staged
            .users
            .iter()
            .find(|s| s.user.username == username)
            .map(|s| UserRef { id: s.user.id }))
    }

    async fn assign_user_group(
        &mut self,
        user_id: Uuid,
        group: &GroupRef,
        at: DateTime<Utc>,
    ) -> StoreResult<u64> {
        if self.take_fault(&[Fault::UserUpdateMatchesNothing]).await.is_some() {
            return Ok(0);
        }

        match self.staged.user_mut(user_id) {
            Some(user) => {
                user.group_name = group.name.clone();
                user.group_id = Some(group.id);
                user.updated_at = at;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn add_group_member(
        &mut self,
        group_id: Uuid,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> StoreResult<u64> {
        match self
            .take_fault(&[Fault::GroupUpdateMatchesNothing, Fault::GroupUpdateFails])
            .await
        {
            Some(Fault::GroupUpdateFails) => {
                return Err(StoreError::backend("injected group update failure"));
            }
            Some(_) => return Ok(0),
            None => {}
        }

        match self.staged.group_mut(group_id) {
            Some(group) => {
                if !group.has_member(user_id) {
                    group.members.push(user_id);
                }
                group.updated_at = at;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let MemoryTransaction {
            mut guard, staged, ..
        } = *self;
        *guard = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> StoreResult<()> {
        Ok(())
    }
}
