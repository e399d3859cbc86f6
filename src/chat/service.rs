use std::sync::Arc;

use crate::chat::fallback;
use crate::conversation::prompts::{context_instruction, GENERIC_ANSWER};
use crate::conversation::ConversationStore;
use crate::llm::{ChatClient, GenerationParams};
use crate::models::{Fragment, Role};
use crate::search::classify::is_generic;
use crate::search::engine::SearchEngine;

/// One conversational turn: classify, retrieve, record, ask the model, record.
pub struct ChatService {
    store: Arc<ConversationStore>,
    search: Arc<SearchEngine>,
    client: Arc<dyn ChatClient>,
    params: GenerationParams,
}

impl ChatService {
    pub fn new(
        store: Arc<ConversationStore>,
        search: Arc<SearchEngine>,
        client: Arc<dyn ChatClient>,
        params: GenerationParams,
    ) -> Self {
        Self {
            store,
            search,
            client,
            params,
        }
    }

    pub fn store(&self) -> &Arc<ConversationStore> {
        &self.store
    }

    /// Answer `text` for `user_id`. Never fails: errors become fallback replies,
    /// and a failed turn leaves no assistant entry behind.
    pub async fn process_message(&self, text: &str, user_id: &str) -> String {
        if is_generic(text) {
            tracing::info!("Generic question from {user_id}: {text}");
            return GENERIC_ANSWER.to_string();
        }

        self.store.add_message(user_id, Role::User, text);

        let search = self.search.clone();
        let query = text.to_string();
        let fragments = match tokio::task::spawn_blocking(move || search.search(&query)).await {
            Ok(fragments) => fragments,
            Err(e) => {
                tracing::error!("Search task failed: {e}");
                return fallback::UNEXPECTED.to_string();
            }
        };

        match build_context(&fragments) {
            Some(context) => {
                tracing::info!("Adding context from {} fragments", fragments.len());
                self.store
                    .add_message(user_id, Role::System, context_instruction(&context));
            }
            None => tracing::info!("No relevant fragments found for context"),
        }

        let history = self.store.get_conversation(user_id);
        match self.client.complete(&history, &self.params).await {
            Ok(reply) if !reply.trim().is_empty() => {
                self.store.add_message(user_id, Role::Assistant, reply.as_str());
                reply
            }
            Ok(_) => {
                tracing::warn!("Empty completion from LLM API");
                fallback::EMPTY_REPLY.to_string()
            }
            Err(e) => {
                tracing::error!("LLM request failed: {e}");
                fallback::for_error(&e).to_string()
            }
        }
    }
}

/// Fragment texts joined by a blank line, or None when nothing was retrieved.
fn build_context(fragments: &[Fragment]) -> Option<String> {
    if fragments.is_empty() {
        return None;
    }
    Some(
        fragments
            .iter()
            .map(|f| f.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n"),
    )
}
