//! User handlers
//!
//! REST mirror of the relay's presence view.

use axum::{extract::State, Json};
use relay_service::ActiveUserResponse;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// List currently active users, excluding the caller
///
/// GET /api/users
pub async fn get_active_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ActiveUserResponse>>> {
    let mut users = Vec::new();

    for user_id in state.registry().active_users(auth.user_id) {
        // A user can disconnect between the snapshot and the lookup;
        // missing rows are simply skipped
        let found = state
            .service_context()
            .user_repo()
            .find_by_id(user_id)
            .await?;
        if let Some(user) = found {
            users.push(ActiveUserResponse {
                user_id: user.id,
                username: user.username,
            });
        }
    }

    Ok(Json(users))
}
