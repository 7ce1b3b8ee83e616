//! PostgreSQL store tests
//!
//! Exercise the SQL behind the join: set-union under concurrency, matched
//! counts, rollback, and classification of unique violations.

use std::time::Duration;

use chrono::Utc;
use cribb::backend::groups::JoinCoordinator;
use cribb::backend::store::{
    GroupRef, NewUser, Store, StoreError, StoreTransaction, GROUPS_NAME_KEY, USERS_PHONE_NUMBER_KEY,
    USERS_USERNAME_KEY,
};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::common::database::{new_group, new_user, unique, TestDatabase};

#[tokio::test]
async fn test_duplicate_username_names_its_constraint() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    let username = unique("alice");
    db.store().insert_user(new_user(&username)).await.unwrap();

    let err = db.store().insert_user(new_user(&username)).await.unwrap_err();

    assert_eq!(err, StoreError::duplicate_key(USERS_USERNAME_KEY));
}

#[tokio::test]
async fn test_duplicate_phone_names_its_constraint() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    let first = db.store().insert_user(new_user(&unique("alice"))).await.unwrap();

    let clash = NewUser {
        phone_number: first.phone_number.clone(),
        ..new_user(&unique("alicia"))
    };
    let err = db.store().insert_user(clash).await.unwrap_err();

    assert_eq!(err, StoreError::duplicate_key(USERS_PHONE_NUMBER_KEY));
}

#[tokio::test]
async fn test_duplicate_group_name_names_its_constraint() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    let name = unique("Apt4B");
    db.store().insert_group(new_group(&name)).await.unwrap();

    let err = db.store().insert_group(new_group(&name)).await.unwrap_err();

    assert_eq!(err, StoreError::duplicate_key(GROUPS_NAME_KEY));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_joins_keep_every_member() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    let group_name = unique("Apt4B");
    db.store().insert_group(new_group(&group_name)).await.unwrap();

    let mut usernames = Vec::new();
    let mut ids = Vec::new();
    for i in 0..6 {
        let user = db
            .store()
            .insert_user(new_user(&unique(&format!("roommate{i}"))))
            .await
            .unwrap();
        usernames.push(user.username);
        ids.push(user.id);
    }

    let coordinator = JoinCoordinator::new(db.shared_store(), Duration::from_secs(10));
    let handles: Vec<_> = usernames
        .iter()
        .map(|username| {
            let coordinator = coordinator.clone();
            let username = username.clone();
            let group_name = group_name.clone();
            tokio::spawn(async move { coordinator.join(&username, &group_name).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let group = db.store().find_group_by_name(&group_name).await.unwrap().unwrap();
    let mut members = group.members.clone();
    members.sort();
    ids.sort();
    assert_eq!(members, ids);

    let listed = db.store().list_users_in_group(group.id).await.unwrap();
    assert_eq!(listed.len(), usernames.len());
    assert!(listed.iter().all(|user| user.group_name == group_name));
}

#[tokio::test]
async fn test_repeated_join_keeps_one_membership() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    let group_name = unique("Apt4B");
    db.store().insert_group(new_group(&group_name)).await.unwrap();
    let user = db.store().insert_user(new_user(&unique("alice"))).await.unwrap();

    let coordinator = JoinCoordinator::new(db.shared_store(), Duration::from_secs(10));
    coordinator.join(&user.username, &group_name).await.unwrap();
    coordinator.join(&user.username, &group_name).await.unwrap();

    let group = db.store().find_group_by_name(&group_name).await.unwrap().unwrap();
    assert_eq!(group.members, vec![user.id]);
}

#[tokio::test]
async fn test_rolled_back_transaction_leaves_rows_unchanged() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    let group = db.store().insert_group(new_group(&unique("Apt4B"))).await.unwrap();
    let user = db.store().insert_user(new_user(&unique("alice"))).await.unwrap();
    let group_ref = GroupRef {
        id: group.id,
        name: group.name.clone(),
    };

    let mut tx = db.store().begin().await.unwrap();
    assert_eq!(tx.assign_user_group(user.id, &group_ref, Utc::now()).await.unwrap(), 1);
    assert_eq!(tx.add_group_member(group.id, user.id, Utc::now()).await.unwrap(), 1);
    tx.rollback().await.unwrap();

    let reloaded_user = db.store().find_user_by_username(&user.username).await.unwrap().unwrap();
    let reloaded_group = db.store().find_group_by_name(&group.name).await.unwrap().unwrap();
    assert_eq!(reloaded_user.group_id, None);
    assert_eq!(reloaded_user.group_name, "");
    assert!(reloaded_group.members.is_empty());
}

#[tokio::test]
async fn test_dropped_transaction_leaves_rows_unchanged() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    let group = db.store().insert_group(new_group(&unique("Apt4B"))).await.unwrap();
    let user = db.store().insert_user(new_user(&unique("alice"))).await.unwrap();
    let group_ref = GroupRef {
        id: group.id,
        name: group.name.clone(),
    };

    {
        let mut tx = db.store().begin().await.unwrap();
        tx.assign_user_group(user.id, &group_ref, Utc::now()).await.unwrap();
    }

    let reloaded = db.store().find_user_by_username(&user.username).await.unwrap().unwrap();
    assert_eq!(reloaded.group_id, None);
}

#[tokio::test]
async fn test_updates_report_matched_count() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    let group = db.store().insert_group(new_group(&unique("Apt4B"))).await.unwrap();
    let user = db.store().insert_user(new_user(&unique("alice"))).await.unwrap();
    let group_ref = GroupRef {
        id: group.id,
        name: group.name.clone(),
    };

    let mut tx = db.store().begin().await.unwrap();
    assert_eq!(tx.assign_user_group(Uuid::new_v4(), &group_ref, Utc::now()).await.unwrap(), 0);
    assert_eq!(tx.add_group_member(Uuid::new_v4(), user.id, Utc::now()).await.unwrap(), 0);
    // A member already present still counts as matched.
    assert_eq!(tx.add_group_member(group.id, user.id, Utc::now()).await.unwrap(), 1);
    assert_eq!(tx.add_group_member(group.id, user.id, Utc::now()).await.unwrap(), 1);
    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn test_member_listing_uses_byte_order() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    let group_name = unique("Apt4B");
    db.store().insert_group(new_group(&group_name)).await.unwrap();
    let suffix = Uuid::new_v4().simple().to_string();
    let lower = db.store().insert_user(new_user(&format!("adam-{suffix}"))).await.unwrap();
    let upper = db.store().insert_user(new_user(&format!("Zed-{suffix}"))).await.unwrap();

    let coordinator = JoinCoordinator::new(db.shared_store(), Duration::from_secs(10));
    coordinator.join(&lower.username, &group_name).await.unwrap();
    coordinator.join(&upper.username, &group_name).await.unwrap();

    let group = db.store().find_group_by_name(&group_name).await.unwrap().unwrap();
    let listed: Vec<String> = db
        .store()
        .list_users_in_group(group.id)
        .await
        .unwrap()
        .into_iter()
        .map(|user| user.username)
        .collect();
    assert_eq!(listed, vec![upper.username, lower.username]);
}
