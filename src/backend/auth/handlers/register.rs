/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /api/register.
 *
 * # Registration Process
 *
 * 1. Decode the body (malformed JSON is a 400)
 * 2. Reject empty fields
 * 3. Hash the password with bcrypt
 * 4. Insert the user; unique constraints decide duplicates
 *
 * # Security
 *
 * - The response carries only a confirmation message
 * - Passwords and hashes are never returned or logged
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{MessageResponse, RegisterRequest};
use crate::backend::error::{ApiJson, BackendError};
use crate::backend::users::directory::UserDirectory;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - Malformed body or an empty field
/// * `409 Conflict` - Username or phone number already registered
/// * `500 Internal Server Error` - Hashing or store failure
///
/// # Example Request
///
/// ```http
/// POST /api/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "password": "hunter2",
///   "name": "Alice",
///   "phone_number": "555-0100"
/// }
/// ```
pub async fn register(
    State(users): State<UserDirectory>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), BackendError> {
    tracing::info!("Registration request for username: {}", request.username);

    users.create_user(request.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}
