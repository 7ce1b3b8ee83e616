/**
 * User HTTP Handlers
 *
 * Read-only endpoints over the user directory.
 *
 * # Routes
 *
 * - `GET /api/users` - every user
 * - `GET /api/users/by-username?username=` - one user
 * - `GET /api/users/by-score` - every user, highest score first
 */

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;

use crate::backend::error::BackendError;
use crate::backend::users::directory::UserDirectory;
use crate::shared::User;

/// Query string for `GET /api/users/by-username`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UsernameQuery {
    pub username: String,
}

pub async fn list_users(
    State(users): State<UserDirectory>,
) -> Result<Json<Vec<User>>, BackendError> {
    let all = users.list_all().await?;
    tracing::debug!("Listed {} users", all.len());
    Ok(Json(all))
}

/// Look up one user
///
/// # Errors
///
/// * `400 Bad Request` - `username` missing or empty
/// * `404 Not Found` - No such user
pub async fn get_user_by_username(
    State(users): State<UserDirectory>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<User>, BackendError> {
    let user = users.find_by_username(&query.username).await?;
    Ok(Json(user))
}

/// Leaderboard listing; ties are ordered by username
pub async fn list_users_by_score(
    State(users): State<UserDirectory>,
) -> Result<Json<Vec<User>>, BackendError> {
    Ok(Json(users.list_sorted_by_score().await?))
}
