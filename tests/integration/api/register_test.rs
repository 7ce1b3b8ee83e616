//! Registration API integration tests

use std::future::IntoFuture;

use axum::body::Bytes;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{assert_error, assert_no_credentials, spawn_app};

#[tokio::test]
async fn test_register_success() {
    let app = spawn_app();

    let response = app.register("alice").await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body, json!({ "message": "User created successfully" }));

    let user: serde_json::Value = app.user("alice").await.json();
    assert_eq!(user["username"], "alice");
    assert_eq!(user["name"], "ALICE");
    assert_eq!(user["score"], 10);
    assert_eq!(user["group"], "");
    assert_eq!(user["group_id"], serde_json::Value::Null);
    assert_no_credentials(&user);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = spawn_app();
    app.register("alice").await;

    let response = app
        .server
        .post("/api/register")
        .json(&json!({
            "username": "alice",
            "password": "other",
            "name": "Another Alice",
            "phone_number": "555-9999",
        }))
        .await;

    assert_error(&response, StatusCode::CONFLICT, "Username or phone number already exists");
}

#[tokio::test]
async fn test_register_duplicate_phone_number() {
    let app = spawn_app();
    app.register("alice").await;

    let response = app
        .server
        .post("/api/register")
        .json(&json!({
            "username": "alicia",
            "password": "other",
            "name": "Alicia",
            "phone_number": "+1555-alice",
        }))
        .await;

    assert_error(&response, StatusCode::CONFLICT, "Username or phone number already exists");
}

#[tokio::test]
async fn test_register_missing_field() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/register")
        .json(&json!({
            "username": "alice",
            "password": "hunter22",
            "name": "Alice",
        }))
        .await;

    assert_error(&response, StatusCode::BAD_REQUEST, "phone_number is required");
}

#[tokio::test]
async fn test_register_empty_field() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/register")
        .json(&json!({
            "username": "",
            "password": "hunter22",
            "name": "Alice",
            "phone_number": "555-0100",
        }))
        .await;

    assert_error(&response, StatusCode::BAD_REQUEST, "username is required");
}

#[tokio::test]
async fn test_register_malformed_json() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/register")
        .bytes(Bytes::from_static(b"{\"username\": "))
        .content_type("application/json")
        .await;

    assert_error(&response, StatusCode::BAD_REQUEST, "Invalid request body");
}

#[tokio::test]
async fn test_concurrent_duplicate_registration() {
    let app = spawn_app();
    let body = json!({
        "username": "carol",
        "password": "hunter22",
        "name": "Carol",
        "phone_number": "555-0199",
    });

    let first = app.server.post("/api/register").json(&body).into_future();
    let second = app.server.post("/api/register").json(&body).into_future();
    let (first, second) = tokio::join!(first, second);

    let mut statuses = vec![first.status_code(), second.status_code()];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);
}
