/**
 * User Directory
 *
 * This module owns user records: registration, lookup by username and the
 * two listings. It holds a store handle and nothing else.
 *
 * # Registration
 *
 * 1. Reject empty fields
 * 2. Hash the password with bcrypt
 * 3. Insert with score 10 and no group
 *
 * Duplicates are detected by the store's unique constraints on `username`
 * and `phone_number`, not by a prior lookup, so two concurrent registrations
 * of the same username yield exactly one success.
 */

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::password::{hash_password, PasswordError};
use crate::backend::store::{
    NewUser, Store, StoreError, USERS_PHONE_NUMBER_KEY, USERS_USERNAME_KEY,
};
use crate::shared::error::require;
use crate::shared::{SharedError, User, DEFAULT_SCORE};

/// Errors returned by `UserDirectory`
#[derive(Debug, Error)]
pub enum UserDirectoryError {
    #[error(transparent)]
    Validation(#[from] SharedError),

    #[error("username or phone number already exists")]
    DuplicateUsernameOrPhone,

    #[error("user '{username}' not found")]
    NotFound { username: String },

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Fields needed to register a user
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub phone_number: String,
}

impl Registration {
    pub fn validate(&self) -> Result<(), SharedError> {
        require("username", &self.username)?;
        require("password", &self.password)?;
        require("name", &self.display_name)?;
        require("phone_number", &self.phone_number)?;
        Ok(())
    }
}

/// Directory of registered users
#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<dyn Store>,
    bcrypt_cost: u32,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn Store>, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    /// Register a new user
    pub async fn create_user(&self, registration: Registration) -> Result<User, UserDirectoryError> {
        registration.validate()?;

        let password_hash = hash_password(registration.password, self.bcrypt_cost).await?;

        let new_user = NewUser {
            id: Uuid::new_v4(),
            username: registration.username,
            password_hash,
            display_name: registration.display_name,
            phone_number: registration.phone_number,
            score: DEFAULT_SCORE,
            created_at: Utc::now(),
        };

        match self.store.insert_user(new_user).await {
            Ok(user) => {
                tracing::info!("User created successfully: {} ({})", user.username, user.id);
                Ok(user)
            }
            Err(err)
                if err.is_duplicate_of(USERS_USERNAME_KEY)
                    || err.is_duplicate_of(USERS_PHONE_NUMBER_KEY) =>
            {
                tracing::warn!("Registration rejected by unique constraint: {}", err);
                Err(UserDirectoryError::DuplicateUsernameOrPhone)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Look up a user by username
    pub async fn find_by_username(&self, username: &str) -> Result<User, UserDirectoryError> {
        require("username", username)?;

        self.store
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| UserDirectoryError::NotFound {
                username: username.to_string(),
            })
    }

    /// Every user, in insertion order
    pub async fn list_all(&self) -> Result<Vec<User>, UserDirectoryError> {
        Ok(self.store.list_users().await?)
    }

    /// Every user, highest score first
    pub async fn list_sorted_by_score(&self) -> Result<Vec<User>, UserDirectoryError> {
        Ok(self.store.list_users_by_score().await?)
    }
}
