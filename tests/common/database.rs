//! Database test fixtures and utilities
//!
//! The live tier runs against the PostgreSQL named by `DATABASE_URL` and is
//! skipped when that variable is unset. Tests share one database, so every
//! fixture name carries a random suffix instead of truncating tables.

use std::sync::Arc;

use chrono::Utc;
use cribb::backend::auth::CredentialHash;
use cribb::backend::store::{NewGroup, NewUser, PgStore, Store};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

/// Test database fixture
pub struct TestDatabase {
    store: PgStore,
}

impl TestDatabase {
    /// Connect and migrate, or `None` when `DATABASE_URL` is not set
    pub async fn connect() -> Option<Self> {
        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => {
                eprintln!("DATABASE_URL not set; skipping live database test");
                return None;
            }
        };

        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect(&database_url)
            .await
            .expect("Failed to create test database pool");
        let store = PgStore::new(pool);
        store.migrate().await.expect("Failed to run migrations");

        Some(Self { store })
    }

    pub fn store(&self) -> &PgStore {
        &self.store
    }

    /// Shared handle for components that take `Arc<dyn Store>`
    pub fn shared_store(&self) -> Arc<dyn Store> {
        Arc::new(self.store.clone())
    }

    pub fn pool(&self) -> &PgPool {
        self.store.pool()
    }
}

/// `prefix` plus a random suffix
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// A user whose phone number is derived from a fresh id
pub fn new_user(username: &str) -> NewUser {
    let id = Uuid::new_v4();
    NewUser {
        id,
        username: username.to_string(),
        password_hash: CredentialHash::from_hashed("$2b$04$seeded"),
        display_name: username.to_string(),
        phone_number: format!("+1555-{}", id.simple()),
        score: 10,
        created_at: Utc::now(),
    }
}

pub fn new_group(name: &str) -> NewGroup {
    NewGroup {
        id: Uuid::new_v4(),
        name: name.to_string(),
        created_at: Utc::now(),
    }
}
