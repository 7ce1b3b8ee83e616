/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds the two directories and the join coordinator. All three
 * share one `Arc<dyn Store>`; there is no other in-process mutable state.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract only the component
 * they use, e.g. `State(users): State<UserDirectory>`.
 */

use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRef;

use crate::backend::groups::{GroupDirectory, JoinCoordinator};
use crate::backend::store::Store;
use crate::backend::users::UserDirectory;

/// Application state shared by every handler
///
/// # Fields
///
/// * `users` - Registration and user lookups
/// * `groups` - Group creation and member listing
/// * `coordinator` - The atomic join
/// * `store` - The handle the components share, kept for shutdown
#[derive(Clone)]
pub struct AppState {
    pub users: UserDirectory,
    pub groups: GroupDirectory,
    pub coordinator: JoinCoordinator,
    pub store: Arc<dyn Store>,
}

impl AppState {
    /// Build every component over one store handle
    ///
    /// # Arguments
    ///
    /// * `store` - Store shared by all components
    /// * `bcrypt_cost` - Work factor for password hashing
    /// * `transaction_timeout` - Deadline for one join
    pub fn new(store: Arc<dyn Store>, bcrypt_cost: u32, transaction_timeout: Duration) -> Self {
        Self {
            users: UserDirectory::new(store.clone(), bcrypt_cost),
            groups: GroupDirectory::new(store.clone()),
            coordinator: JoinCoordinator::new(store.clone(), transaction_timeout),
            store,
        }
    }
}

impl FromRef<AppState> for UserDirectory {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.users.clone()
    }
}

impl FromRef<AppState> for GroupDirectory {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.groups.clone()
    }
}

impl FromRef<AppState> for JoinCoordinator {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.coordinator.clone()
    }
}
