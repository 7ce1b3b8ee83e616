//! User Data Structure
//!
//! This module defines the outward-facing user record returned by every user
//! listing and lookup endpoint.
//!
//! The type deliberately carries no credential material: the password hash is
//! only ever written to the store and is never read back into a `User`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Score assigned to every newly registered user
pub const DEFAULT_SCORE: i32 = 10;

/// Score at which a user is considered neither good nor poor
pub const NEUTRAL_SCORE: i32 = 5;

/// A registered user
///
/// # JSON Shape
///
/// ```json
/// {
///   "id": "4a0c5a9e-2c1b-4d2f-9a63-0a6a5d1b8f11",
///   "username": "alice",
///   "name": "Alice",
///   "phone_number": "+15550100",
///   "score": 10,
///   "standing": "good",
///   "group": "Apt4B",
///   "group_id": "9f4a...",
///   "created_at": "2025-02-15T10:00:00Z",
///   "updated_at": "2025-02-15T10:05:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "UserFields")]
pub struct User {
    /// Unique user ID (UUID), assigned on creation
    pub id: Uuid,
    /// Username (globally unique, immutable)
    pub username: String,
    /// Display name
    #[serde(rename = "name")]
    pub display_name: String,
    /// Phone number (globally unique)
    pub phone_number: String,
    /// Chore score
    pub score: i32,
    /// Derived from `score`, never stored; recomputed on deserialize
    pub standing: Standing,
    /// Name of the joined group, empty when unaffiliated
    #[serde(rename = "group")]
    pub group_name: String,
    /// ID of the joined group, `null` when unaffiliated
    pub group_id: Option<Uuid>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Wire shape of `User` without the derived `standing`
#[derive(Deserialize)]
struct UserFields {
    id: Uuid,
    username: String,
    #[serde(rename = "name")]
    display_name: String,
    phone_number: String,
    score: i32,
    #[serde(rename = "group")]
    group_name: String,
    group_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserFields> for User {
    fn from(fields: UserFields) -> Self {
        Self {
            id: fields.id,
            username: fields.username,
            display_name: fields.display_name,
            phone_number: fields.phone_number,
            score: fields.score,
            standing: Standing::from_score(fields.score),
            group_name: fields.group_name,
            group_id: fields.group_id,
            created_at: fields.created_at,
            updated_at: fields.updated_at,
        }
    }
}

impl User {
    /// Whether the user belongs to a group.
    ///
    /// `group_name` and `group_id` are always set together, so either field
    /// would do; both are checked to surface a broken record in tests.
    pub fn is_affiliated(&self) -> bool {
        self.group_id.is_some() && !self.group_name.is_empty()
    }
}

/// Coarse ranking of a user's score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    Good,
    #[default]
    Neutral,
    Poor,
}

impl Standing {
    pub fn from_score(score: i32) -> Self {
        match score.cmp(&NEUTRAL_SCORE) {
            std::cmp::Ordering::Greater => Self::Good,
            std::cmp::Ordering::Less => Self::Poor,
            std::cmp::Ordering::Equal => Self::Neutral,
        }
    }
}

/// Order users by score, highest first.
///
/// Ties are broken by username so the listing is stable across calls.
pub fn rank_by_score(users: &mut [User]) {
    users.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.username.cmp(&b.username))
    });
}
