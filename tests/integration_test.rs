//! Integration tests for the chat pipeline.
//!
//! These tests run full turns against a temporary corpus with a scripted
//! in-process LLM client, so no network or model is needed.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use parking_lot::Mutex;
use tower::ServiceExt;

use cofog_assistant::api;
use cofog_assistant::chat::fallback;
use cofog_assistant::config::Config;
use cofog_assistant::conversation::prompts::{GENERIC_ANSWER, SYSTEM_PREAMBLE};
use cofog_assistant::llm::{ChatClient, GenerationParams, LlmError};
use cofog_assistant::models::{ChatMessage, Role};
use cofog_assistant::state::AppState;

/// Answers every request the same way and records what it was sent.
struct ScriptedClient {
    outcome: fn() -> Result<String, LlmError>,
    seen: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedClient {
    fn new(outcome: fn() -> Result<String, LlmError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        _params: &GenerationParams,
    ) -> Result<String, LlmError> {
        self.seen.lock().push(messages.to_vec());
        (self.outcome)()
    }
}

/// Helper: a two-scope corpus resembling the regulation chunks.
fn sample_corpus(root: &Path) {
    let primary = root.join("pdf_chunks_part8");
    let wide = root.join("pdf_chunks_part1");
    std::fs::create_dir_all(&primary).unwrap();
    std::fs::create_dir_all(&wide).unwrap();

    std::fs::write(
        primary.join("chunk_001.txt"),
        "Kods 09.620 ēdināšanas pakalpojumi. Kodā 09.620 uzskaita izdevumus par \
         izglītojamo ēdināšanai paredzētajiem pakalpojumiem.",
    )
    .unwrap();
    std::fs::write(
        primary.join("chunk_002.txt"),
        "Kods 09.610 izglītojamo pārvadājumu pakalpojumi. Neuzskaita: braukšanas maksas \
         atvieglojumus sabiedriskajā transportā (04.500).",
    )
    .unwrap();
    std::fs::write(
        wide.join("chunk_101.txt"),
        "COFOG 09.6 Subsidiary services to education: transportation, food and lodging.",
    )
    .unwrap();
}

fn config_for(root: &Path) -> Config {
    let mut config = Config::default();
    config.corpus.root = root.to_path_buf();
    config.corpus.primary = vec!["pdf_chunks_part8".into()];
    config.corpus.secondary_wide = vec!["pdf_chunks_part1".into()];
    config.llm.api_key = Some("test".into());
    config
}

#[tokio::test]
async fn test_end_to_end_turn_records_context_and_reply() {
    let dir = tempfile::tempdir().unwrap();
    sample_corpus(dir.path());
    let client = ScriptedClient::new(|| Ok("Kods 09.620.".into()));
    let state = AppState::with_client(config_for(dir.path()), client.clone());

    let reply = state
        .chat
        .process_message("Kāds kods ir ēdināšanai?", "u1")
        .await;
    assert_eq!(reply, "Kods 09.620.");

    let history = state.conversations.get_conversation("u1");
    let roles: Vec<Role> = history.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![Role::System, Role::User, Role::System, Role::Assistant]
    );
    assert_eq!(history[0].content, SYSTEM_PREAMBLE);
    assert_eq!(history[1].content, "Kāds kods ir ēdināšanai?");
    assert!(history[2].content.contains("09.620"));
    assert_eq!(history[3].content, "Kods 09.620.");

    // The model saw everything except its own answer
    let seen = client.seen.lock();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].len(), 3);
}

#[tokio::test]
async fn test_best_fragment_comes_first_in_context() {
    let dir = tempfile::tempdir().unwrap();
    sample_corpus(dir.path());
    let client = ScriptedClient::new(|| Ok("Kods 09.620.".into()));
    let state = AppState::with_client(config_for(dir.path()), client);

    state
        .chat
        .process_message("Kāds kods ir ēdināšanai? 09.620", "u1")
        .await;

    let history = state.conversations.get_conversation("u1");
    let context = &history[2].content;
    let meals = context.find("09.620 ēdināšanas").unwrap();
    if let Some(transport) = context.find("09.610") {
        assert!(meals < transport);
    }
}

#[tokio::test]
async fn test_timeout_returns_fallback_without_assistant_entry() {
    let dir = tempfile::tempdir().unwrap();
    sample_corpus(dir.path());
    let client = ScriptedClient::new(|| Err(LlmError::Timeout));
    let state = AppState::with_client(config_for(dir.path()), client);

    let reply = state
        .chat
        .process_message("Kāds kods ir ēdināšanai?", "u1")
        .await;
    assert_eq!(reply, fallback::TIMEOUT);

    let history = state.conversations.get_conversation("u1");
    assert!(history.iter().all(|m| m.role != Role::Assistant));
    assert_eq!(history.len(), 3);
}

#[tokio::test]
async fn test_connection_error_fallback() {
    let dir = tempfile::tempdir().unwrap();
    sample_corpus(dir.path());
    let client = ScriptedClient::new(|| Err(LlmError::Connection("refused".into())));
    let state = AppState::with_client(config_for(dir.path()), client);

    let reply = state
        .chat
        .process_message("Kāds kods ir ēdināšanai?", "u1")
        .await;
    assert_eq!(reply, fallback::CONNECTION);
}

#[tokio::test]
async fn test_eviction_across_turns() {
    let dir = tempfile::tempdir().unwrap();
    sample_corpus(dir.path());
    let client = ScriptedClient::new(|| Ok("Kods 09.620.".into()));
    let mut config = config_for(dir.path());
    config.conversation.max_users = 2;
    let state = AppState::with_client(config, client);

    for user in ["first", "second", "third"] {
        state
            .chat
            .process_message("Kāds kods ir ēdināšanai?", user)
            .await;
    }

    assert_eq!(state.conversations.user_count(), 2);
    assert!(!state.conversations.contains("first"));
    let first = state.conversations.get_conversation("first");
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].role, Role::System);
}

// ─── HTTP surface ────────────────────────────────────────

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_http_chat_and_reset() {
    let dir = tempfile::tempdir().unwrap();
    sample_corpus(dir.path());
    let client = ScriptedClient::new(|| Ok("Kods 09.620.".into()));
    let state = AppState::with_client(config_for(dir.path()), client);
    let app = api::router(state.clone());

    let resp = app
        .clone()
        .oneshot(post_json(
            "/chat",
            serde_json::json!({ "message": "Kāds kods ir ēdināšanai?", "user_id": "web" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["response"], "Kods 09.620.");
    assert_eq!(state.conversations.get_conversation("web").len(), 4);

    let resp = app
        .clone()
        .oneshot(post_json("/reset", serde_json::json!({ "user_id": "web" })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "success");
    assert_eq!(state.conversations.get_conversation("web").len(), 1);

    let resp = app
        .oneshot(post_json("/reset", serde_json::json!({ "user_id": "nobody" })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["status"], "error");
    assert!(!state.conversations.contains("nobody"));
}

#[tokio::test]
async fn test_http_chat_generic_and_missing_message() {
    let dir = tempfile::tempdir().unwrap();
    let client = ScriptedClient::new(|| Ok("nelietots".into()));
    let state = AppState::with_client(config_for(dir.path()), client.clone());
    let app = api::router(state);

    let resp = app
        .clone()
        .oneshot(post_json("/chat", serde_json::json!({ "message": "ko tu zini?" })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["response"], GENERIC_ANSWER);
    assert!(client.seen.lock().is_empty());

    let resp = app
        .oneshot(post_json("/chat", serde_json::json!({ "user_id": "u1" })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["error"].is_string());
}

#[tokio::test]
async fn test_http_health() {
    let dir = tempfile::tempdir().unwrap();
    let client = ScriptedClient::new(|| Ok(String::new()));
    let app = api::router(AppState::with_client(config_for(dir.path()), client));

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["env"], "production");
}
