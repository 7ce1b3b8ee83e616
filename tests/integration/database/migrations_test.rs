//! Database migration tests
//!
//! Tests to ensure migrations run correctly and the schema carries the
//! constraint names the store classifies duplicates by.

use cribb::backend::store::{GROUPS_NAME_KEY, USERS_PHONE_NUMBER_KEY, USERS_USERNAME_KEY};
use pretty_assertions::assert_eq;

use crate::common::database::TestDatabase;

#[tokio::test]
async fn test_migrations_are_repeatable() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };

    let result = db.store().migrate().await;
    assert!(result.is_ok(), "Migrations should be idempotent: {:?}", result);
}

#[tokio::test]
async fn test_tables_exist() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };

    for table in ["users", "groups"] {
        let result = sqlx::query(&format!("SELECT 1 FROM {table} LIMIT 1"))
            .execute(db.pool())
            .await;
        assert!(result.is_ok(), "{} table should exist", table);
    }
}

#[tokio::test]
async fn test_unique_constraint_names_match_store() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };

    let expected = vec![
        GROUPS_NAME_KEY.to_string(),
        USERS_PHONE_NUMBER_KEY.to_string(),
        USERS_USERNAME_KEY.to_string(),
    ];
    let mut found: Vec<String> = sqlx::query_scalar(
        "SELECT conname::text FROM pg_constraint WHERE contype = 'u' AND conname::text = ANY($1)",
    )
    .bind(&expected)
    .fetch_all(db.pool())
    .await
    .unwrap();
    found.sort();

    assert_eq!(found, expected);
}
