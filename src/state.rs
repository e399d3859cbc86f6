use std::sync::Arc;

use crate::chat::ChatService;
use crate::config::Config;
use crate::conversation::prompts::SYSTEM_PREAMBLE;
use crate::conversation::ConversationStore;
use crate::llm::{ChatClient, GenerationParams, HttpChatClient};
use crate::search::engine::SearchEngine;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub conversations: Arc<ConversationStore>,
    pub chat: Arc<ChatService>,
}

impl AppState {
    /// Wire the production HTTP LLM client.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = HttpChatClient::new(config.llm.clone())?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Build the state around any chat client (tests pass a scripted one).
    pub fn with_client(config: Config, client: Arc<dyn ChatClient>) -> Self {
        for folder in config.corpus.primary.iter().chain(&config.corpus.secondary_wide) {
            let path = config.folder_path(folder);
            if !path.is_dir() {
                tracing::warn!("Corpus folder {} does not exist", path.display());
            }
        }

        let conversations = Arc::new(ConversationStore::from_config(
            &config.conversation,
            SYSTEM_PREAMBLE,
        ));
        let search = Arc::new(SearchEngine::from_config(&config.corpus));
        let params = GenerationParams::from(&config.llm);
        let chat = Arc::new(ChatService::new(
            conversations.clone(),
            search,
            client,
            params,
        ));

        Self {
            config,
            conversations,
            chat,
        }
    }
}
