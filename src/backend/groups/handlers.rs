/**
 * Group HTTP Handlers
 *
 * # Routes
 *
 * - `POST /api/groups` - create an empty group
 * - `POST /api/groups/join` - atomically affiliate a user with a group
 * - `GET /api/groups/members?group_name=` - users affiliated with a group
 *
 * Request string fields default to empty so missing fields surface as
 * validation errors with the field name.
 */

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use crate::backend::error::{ApiJson, BackendError};
use crate::backend::groups::directory::GroupDirectory;
use crate::backend::groups::join::JoinCoordinator;
use crate::shared::{Group, User};

/// Request body for `POST /api/groups`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateGroupRequest {
    pub name: String,
}

/// Request body for `POST /api/groups/join`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct JoinGroupRequest {
    pub username: String,
    pub group_name: String,
}

/// Query string for `GET /api/groups/members`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GroupNameQuery {
    pub group_name: String,
}

/// Create a group
///
/// # Errors
///
/// * `400 Bad Request` - Malformed body or empty name
/// * `409 Conflict` - A group with this name exists
pub async fn create_group(
    State(groups): State<GroupDirectory>,
    ApiJson(request): ApiJson<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), BackendError> {
    let group = groups.create_group(request.name).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

/// Join a group
///
/// Both the user's affiliation and the group's member list change, or
/// neither does. Joining a group twice is a no-op on the member list.
///
/// # Errors
///
/// * `400 Bad Request` - Malformed body or an empty field
/// * `404 Not Found` - Group or user does not exist
/// * `500 Internal Server Error` - Store failure or timeout
pub async fn join_group(
    State(coordinator): State<JoinCoordinator>,
    ApiJson(request): ApiJson<JoinGroupRequest>,
) -> Result<StatusCode, BackendError> {
    coordinator
        .join(&request.username, &request.group_name)
        .await?;
    Ok(StatusCode::OK)
}

pub async fn list_group_members(
    State(groups): State<GroupDirectory>,
    Query(query): Query<GroupNameQuery>,
) -> Result<Json<Vec<User>>, BackendError> {
    Ok(Json(groups.list_members(&query.group_name).await?))
}
