//! Test application fixture
//!
//! Builds the real router over a `MemoryStore` so integration tests run
//! without PostgreSQL. The store handle is kept so tests can inspect or
//! seed records directly.

use std::sync::Arc;
use std::time::Duration;

use axum_test::{TestResponse, TestServer};
use cribb::backend::auth::password::MIN_COST;
use cribb::backend::routes::create_router;
use cribb::backend::server::AppState;
use cribb::backend::store::MemoryStore;
use serde_json::json;

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
}

/// Router over a fresh in-memory store, cheapest bcrypt cost, 5 s join deadline
pub fn spawn_app() -> TestApp {
    spawn_app_with_deadline(Duration::from_secs(5))
}

/// Router whose joins give up after `deadline`
pub fn spawn_app_with_deadline(deadline: Duration) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), MIN_COST, deadline);
    let server = TestServer::new(create_router(state)).unwrap();
    TestApp { server, store }
}

impl TestApp {
    /// Register `username` with a phone number derived from it
    pub async fn register(&self, username: &str) -> TestResponse {
        self.server
            .post("/api/register")
            .json(&json!({
                "username": username,
                "password": "hunter22",
                "name": username.to_uppercase(),
                "phone_number": format!("+1555-{username}"),
            }))
            .await
    }

    pub async fn create_group(&self, name: &str) -> TestResponse {
        self.server
            .post("/api/groups")
            .json(&json!({ "name": name }))
            .await
    }

    pub async fn join(&self, username: &str, group_name: &str) -> TestResponse {
        self.server
            .post("/api/groups/join")
            .json(&json!({ "username": username, "group_name": group_name }))
            .await
    }

    pub async fn members(&self, group_name: &str) -> TestResponse {
        self.server
            .get("/api/groups/members")
            .add_query_param("group_name", group_name)
            .await
    }

    pub async fn user(&self, username: &str) -> TestResponse {
        self.server
            .get("/api/users/by-username")
            .add_query_param("username", username)
            .await
    }
}
