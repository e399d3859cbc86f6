use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::chat::resolve_user_id;
use crate::models::{ResetRequest, StatusResponse};
use crate::state::AppState;

/// POST /reset — collapse a user's history to the system preamble.
/// An empty body resets the default user.
pub async fn reset(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<StatusResponse>) {
    let req: ResetRequest = if body.is_empty() {
        ResetRequest::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(req) => req,
            Err(e) => {
                tracing::warn!("Malformed reset request: {e}");
                return failure();
            }
        }
    };

    let user_id = resolve_user_id(req.user_id);
    if state.conversations.reset(&user_id) {
        tracing::info!("Conversation reset for {user_id}");
        (
            StatusCode::OK,
            Json(StatusResponse {
                status: "success".to_string(),
                message: "Saruna atiestatīta".to_string(),
            }),
        )
    } else {
        tracing::warn!("Could not reset conversation for {user_id}");
        failure()
    }
}

fn failure() -> (StatusCode, Json<StatusResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(StatusResponse {
            status: "error".to_string(),
            message: "Neizdevās atiestatīt sarunu".to_string(),
        }),
    )
}
