/**
 * Registration Request and Response Types
 *
 * Field names match the wire format. Every string field defaults to empty
 * so a missing field reaches validation and is reported as
 * "<field> is required" rather than as a decode error.
 */

use serde::{Deserialize, Serialize};

use crate::backend::users::directory::Registration;

/// Request body for `POST /api/register`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    pub phone_number: String,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Self {
            username: request.username,
            password: request.password,
            display_name: request.name,
            phone_number: request.phone_number,
        }
    }
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
