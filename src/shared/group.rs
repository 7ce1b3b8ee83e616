//! Group Data Structure
//!
//! A group is a household. It keeps its own view of who belongs to it in
//! `members`, mirrored on the user side by `User::group_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A household group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique group ID (UUID)
    pub id: Uuid,
    /// Group name (unique)
    pub name: String,
    /// IDs of member users; a set, order carries no meaning
    pub members: Vec<Uuid>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

impl Group {
    pub fn has_member(&self, user_id: Uuid) -> bool {
        self.members.contains(&user_id)
    }
}
