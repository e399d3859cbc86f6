use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use uuid::Uuid;

use crate::api::{truncate_to_char_boundary, MAX_CHAT_MESSAGE_LEN};
use crate::state::AppState;

const PROCESSING_ERROR: &str =
    "Diemžēl radās kļūda apstrādājot jūsu ziņojumu. Lūdzu, mēģiniet vēlāk.";

/// GET /ws — one chat turn per text frame.
pub async fn ws(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let connection_id = Uuid::new_v4().to_string();
    tracing::info!("New client connection: {connection_id}");

    while let Some(frame) = socket.recv().await {
        let text = match frame {
            Ok(Message::Text(text)) => text.as_str().to_string(),
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!("WebSocket error on {connection_id}: {e}");
                break;
            }
        };

        let reply = match parse_frame(&text, &connection_id) {
            Some((user_id, message)) => {
                tracing::info!(
                    "WebSocket message from {user_id}: {}...",
                    truncate_to_char_boundary(&message, 50)
                );
                let response = state.chat.process_message(&message, &user_id).await;
                serde_json::json!({ "response": response })
            }
            None => serde_json::json!({ "error": PROCESSING_ERROR }),
        };

        if socket
            .send(Message::Text(reply.to_string().into()))
            .await
            .is_err()
        {
            break;
        }
    }

    tracing::info!("Client disconnected: {connection_id}");
}

/// A frame is either `{"message": ..., "user_id": ...}` or plain text; plain text
/// (or JSON without a user id) is attributed to the connection itself.
fn parse_frame(text: &str, connection_id: &str) -> Option<(String, String)> {
    let (user_id, message) = match serde_json::from_str::<serde_json::Value>(text) {
        Ok(serde_json::Value::Object(obj)) => {
            let message = obj.get("message")?.as_str()?.to_string();
            let user_id = obj
                .get("user_id")
                .and_then(|v| v.as_str())
                .filter(|id| !id.trim().is_empty())
                .unwrap_or(connection_id)
                .to_string();
            (user_id, message)
        }
        _ => (connection_id.to_string(), text.to_string()),
    };

    let message = message.trim();
    if message.is_empty() {
        return None;
    }
    Some((
        user_id,
        truncate_to_char_boundary(message, MAX_CHAT_MESSAGE_LEN),
    ))
}
