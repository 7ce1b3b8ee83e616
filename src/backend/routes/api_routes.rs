/**
 * API Routes
 *
 * # Routes
 *
 * ## Registration
 * - `POST /api/register` - Create a user
 *
 * ## Users
 * - `GET /api/users` - List users
 * - `GET /api/users/by-username` - Find a user by `username` query parameter
 * - `GET /api/users/by-score` - List users by descending score
 *
 * ## Groups
 * - `POST /api/groups` - Create a group
 * - `POST /api/groups/join` - Join a group
 * - `GET /api/groups/members` - List members by `group_name` query parameter
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::register;
use crate::backend::groups::handlers::{create_group, join_group, list_group_members};
use crate::backend::server::state::AppState;
use crate::backend::users::handlers::{get_user_by_username, list_users, list_users_by_score};

/// Configure API routes
///
/// No route requires authentication.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/register", post(register))
        // User endpoints
        .route("/api/users", get(list_users))
        .route("/api/users/by-username", get(get_user_by_username))
        .route("/api/users/by-score", get(list_users_by_score))
        // Group endpoints
        .route("/api/groups", post(create_group))
        .route("/api/groups/join", post(join_group))
        .route("/api/groups/members", get(list_group_members))
}
