//! HTTP and WebSocket surface over the chat service.

pub mod chat;
pub mod health;
pub mod reset;
pub mod ws;

use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Inbound messages longer than this are cut (on a char boundary).
pub const MAX_CHAT_MESSAGE_LEN: usize = 2000;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/chat", post(chat::chat))
        .route("/reset", post(reset::reset))
        .route("/health", get(health::health))
        .route("/ws", get(ws::ws))
        .with_state(state)
}

async fn serve_index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

pub(crate) fn truncate_to_char_boundary(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    s.char_indices()
        .take_while(|(i, c)| i + c.len_utf8() <= max_len)
        .map(|(_, c)| c)
        .collect()
}
