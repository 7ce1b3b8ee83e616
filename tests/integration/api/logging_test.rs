//! Logging integration tests
//!
//! Each outcome is logged once, by the layer that owns it.

use std::time::Duration;

use axum::http::StatusCode;
use cribb::backend::store::Store;

use crate::common::{assert_error, spawn_app, spawn_app_with_deadline, CapturedLogs};

#[tokio::test]
async fn test_group_creation_logged_once() {
    let (logs, _guard) = CapturedLogs::install();
    let app = spawn_app();

    let response = app.create_group("Apt4B").await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(logs.count("Group created"), 1, "logs:\n{}", logs.text());
}

#[tokio::test]
async fn test_join_timeout_logged_once() {
    let (logs, _guard) = CapturedLogs::install();
    let app = spawn_app_with_deadline(Duration::from_millis(50));
    app.register("alice").await;
    app.create_group("Apt4B").await;

    let blocker = app.store.begin().await.unwrap();
    let response = app.join("alice", "Apt4B").await;
    drop(blocker);

    assert_error(&response, StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
    assert_eq!(logs.count("Store operation failed"), 1, "logs:\n{}", logs.text());
    assert_eq!(logs.count("store operation timed out"), 1, "logs:\n{}", logs.text());
}
