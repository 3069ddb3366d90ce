//! Message handlers

use axum::{
    extract::{Path, State},
    Json,
};
use relay_service::{MessageResponse, MessageService};

use crate::extractors::{AuthUser, PeerIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Conversation history between the caller and a peer, oldest first
///
/// GET /api/messages/:peer_id
pub async fn get_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PeerIdPath>,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let peer_id = path.peer_id()?;
    let service = MessageService::new(state.service_context());
    let messages = service.history(auth.user_id, peer_id).await?;
    Ok(Json(messages))
}
