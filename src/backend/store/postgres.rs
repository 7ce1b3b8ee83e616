/**
 * PostgreSQL Store
 *
 * This module implements the `Store` port over a `sqlx::PgPool`.
 *
 * # Tables
 *
 * - `users` - one row per registered user; `group_name`/`group_id` hold the
 *   user's side of the membership relation
 * - `groups` - one row per group; `members UUID[]` holds the group's side
 *
 * Schema lives in `migrations/` and is applied by `PgStore::migrate`.
 *
 * # Concurrency
 *
 * Membership is added with a single conditional `array_append`, evaluated by
 * PostgreSQL against the latest committed row once the row lock is held. Two
 * transactions adding different users to the same group therefore both land
 * in `members`. The join always writes the user row before the group row, so
 * two joins never wait on each other in opposite orders.
 */

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::backend::store::{
    GroupRef, NewGroup, NewUser, Store, StoreError, StoreResult, StoreTransaction, UserRef,
};
use crate::shared::{Group, Standing, User};

/// Columns selected for every outward `User`; the password hash is never read
const USER_COLUMNS: &str =
    "id, username, name, phone_number, score, group_name, group_id, created_at, updated_at";

/// Connection settings for `PgStore::connect`
#[derive(Debug, Clone)]
pub struct PgStoreOptions {
    /// Upper bound on pooled connections
    pub max_connections: u32,
    /// Deadline for establishing or acquiring a connection
    pub connect_timeout: Duration,
}

/// Row shape of `users` without the credential column
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    name: String,
    phone_number: String,
    score: i32,
    group_name: String,
    group_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            display_name: row.name,
            phone_number: row.phone_number,
            score: row.score,
            standing: Standing::from_score(row.score),
            group_name: row.group_name,
            group_id: row.group_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct GroupRow {
    id: Uuid,
    name: String,
    members: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<GroupRow> for Group {
    fn from(row: GroupRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            members: row.members,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// `Store` implementation backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_name` on the server named by `database_url`.
    ///
    /// The database name always wins over whatever database the URL names.
    pub async fn connect(
        database_url: &str,
        database_name: &str,
        options: &PgStoreOptions,
    ) -> StoreResult<Self> {
        let connect_options = PgConnectOptions::from_str(database_url)?.database(database_name);

        tracing::info!("Connecting to database '{}'...", database_name);

        let pool = PgPoolOptions::new()
            .max_connections(options.max_connections)
            .acquire_timeout(options.connect_timeout)
            .connect_with(connect_options)
            .await?;

        tracing::info!("Database connection pool created successfully");
        Ok(Self::new(pool))
    }

    /// Apply the embedded migrations
    pub async fn migrate(&self) -> StoreResult<()> {
        tracing::info!("Running database migrations...");
        sqlx::migrate!().run(&self.pool).await?;
        tracing::info!("Database migrations completed successfully");
        Ok(())
    }

    /// The underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, username, password_hash, name, phone_number, score, group_name, group_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, '', NULL, $7, $7)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.username)
        .bind(user.password_hash.as_str())
        .bind(&user.display_name)
        .bind(&user.phone_number)
        .bind(user.score)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn list_users_by_score(&self) -> StoreResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY score DESC, username COLLATE \"C\" ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn list_users_in_group(&self, group_id: Uuid) -> StoreResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE group_id = $1 ORDER BY username COLLATE \"C\" ASC"
        ))
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn insert_group(&self, group: NewGroup) -> StoreResult<Group> {
        let row = sqlx::query_as::<_, GroupRow>(
            r#"
            INSERT INTO groups (id, name, members, created_at, updated_at)
            VALUES ($1, $2, '{}', $3, $3)
            RETURNING id, name, members, created_at, updated_at
            "#,
        )
        .bind(group.id)
        .bind(&group.name)
        .bind(group.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_group_by_name(&self, name: &str) -> StoreResult<Option<Group>> {
        let row = sqlx::query_as::<_, GroupRow>(
            "SELECT id, name, members, created_at, updated_at FROM groups WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Group::from))
    }

    async fn begin(&self) -> StoreResult<Box<dyn StoreTransaction>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgStoreTransaction { tx }))
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// A PostgreSQL transaction; dropping it uncommitted rolls it back
pub struct PgStoreTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTransaction for PgStoreTransaction {
    async fn find_group_ref(&mut self, name: &str) -> StoreResult<Option<GroupRef>> {
        let group = sqlx::query_as::<_, GroupRef>("SELECT id, name FROM groups WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(group)
    }

    async fn find_user_ref(&mut self, username: &str) -> StoreResult<Option<UserRef>> {
        let user = sqlx::query_as::<_, UserRef>("SELECT id FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(user)
    }

    async fn assign_user_group(
        &mut self,
        user_id: Uuid,
        group: &GroupRef,
        at: DateTime<Utc>,
    ) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET group_name = $1, group_id = $2, updated_at = $3
            WHERE id = $4
            "#,
        )
        .bind(&group.name)
        .bind(group.id)
        .bind(at)
        .bind(user_id)
        .execute(&mut *self.tx)
        .await?;

        Ok(result.rows_affected())
    }

    async fn add_group_member(
        &mut self,
        group_id: Uuid,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE groups
            SET members = CASE
                    WHEN $1 = ANY(members) THEN members
                    ELSE array_append(members, $1)
                END,
                updated_at = $2
            WHERE id = $3
            "#,
        )
        .bind(user_id)
        .bind(at)
        .bind(group_id)
        .execute(&mut *self.tx)
        .await?;

        Ok(result.rows_affected())
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> StoreResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
