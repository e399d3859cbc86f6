use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::{truncate_to_char_boundary, MAX_CHAT_MESSAGE_LEN};
use crate::models::{ChatRequest, ChatResponse, DEFAULT_USER_ID};
use crate::state::AppState;

/// POST /chat — answer one message for a user.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<serde_json::Value>)> {
    let message = req.message.as_deref().map(str::trim).unwrap_or_default();
    if message.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Trūkst 'message' lauka pieprasījumā" })),
        ));
    }
    let message = truncate_to_char_boundary(message, MAX_CHAT_MESSAGE_LEN);

    let user_id = resolve_user_id(req.user_id);
    tracing::info!(
        "REST request from {user_id}: {}...",
        truncate_to_char_boundary(&message, 50)
    );

    let response = state.chat.process_message(&message, &user_id).await;
    Ok(Json(ChatResponse { response }))
}

pub(crate) fn resolve_user_id(user_id: Option<String>) -> String {
    user_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| DEFAULT_USER_ID.to_string())
}
