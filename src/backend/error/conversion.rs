/**
 * Error Conversion
 *
 * This module translates component errors into `BackendError` and
 * `BackendError` into HTTP responses. Logging happens here, once per failure:
 * client-caused rejections at `warn`, inconsistent state and internal
 * failures at `error`.
 *
 * # Response Format
 *
 * Error responses are returned as JSON with the following structure:
 * ```json
 * {
 *   "error": "Group not found",
 *   "status": 404
 * }
 * ```
 */

use axum::{
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::types::BackendError;
use crate::backend::groups::directory::GroupDirectoryError;
use crate::backend::groups::join::JoinError;
use crate::backend::store::StoreError;
use crate::backend::users::directory::UserDirectoryError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Store operation failed: {}", err);
        Self::internal(err.to_string())
    }
}

impl From<UserDirectoryError> for BackendError {
    fn from(err: UserDirectoryError) -> Self {
        match err {
            UserDirectoryError::Validation(shared) => {
                tracing::warn!("Rejected user request: {}", shared);
                shared.into()
            }
            UserDirectoryError::DuplicateUsernameOrPhone => {
                Self::conflict("Username or phone number already exists")
            }
            UserDirectoryError::NotFound { username } => {
                tracing::warn!("User not found: {}", username);
                Self::not_found("User not found")
            }
            UserDirectoryError::Password(password_err) => {
                tracing::error!("Password hashing failed: {}", password_err);
                Self::internal(password_err.to_string())
            }
            UserDirectoryError::Store(store_err) => store_err.into(),
        }
    }
}

impl From<GroupDirectoryError> for BackendError {
    fn from(err: GroupDirectoryError) -> Self {
        match err {
            GroupDirectoryError::Validation(shared) => {
                tracing::warn!("Rejected group request: {}", shared);
                shared.into()
            }
            GroupDirectoryError::DuplicateName { .. } => Self::conflict("Group name already exists"),
            GroupDirectoryError::NotFound { name } => {
                tracing::warn!("Group not found: {}", name);
                Self::not_found("Group not found")
            }
            GroupDirectoryError::Store(store_err) => store_err.into(),
        }
    }
}

impl From<JoinError> for BackendError {
    fn from(err: JoinError) -> Self {
        match err {
            JoinError::Validation(shared) => {
                tracing::warn!("Rejected join request: {}", shared);
                shared.into()
            }
            JoinError::GroupNotFound { name } => {
                tracing::warn!("Join failed, group not found: {}", name);
                Self::not_found("Group not found")
            }
            JoinError::UserNotFound { username } => {
                tracing::warn!("Join failed, user not found: {}", username);
                Self::not_found("User not found")
            }
            JoinError::UserDocumentNotFound { user_id } => {
                tracing::error!("Unexpected: user {} vanished during join; transaction rolled back", user_id);
                Self::inconsistent_state("User document not found")
            }
            JoinError::GroupDocumentNotFound { group_id } => {
                tracing::error!("Unexpected: group {} vanished during join; transaction rolled back", group_id);
                Self::inconsistent_state("Group document not found")
            }
            JoinError::Store(store_err) => store_err.into(),
        }
    }
}
