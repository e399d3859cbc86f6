use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// Development mode flag (reported by /health)
    pub debug: bool,
    /// Corpus folders and ranking limits
    pub corpus: CorpusConfig,
    /// Conversation cache limits
    pub conversation: ConversationConfig,
    /// LLM provider configuration
    pub llm: LlmConfig,
}

/// Where the chunked documents live and which folders form each search scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Directory the folder names are resolved against.
    pub root: PathBuf,
    /// Always scanned.
    pub primary: Vec<String>,
    /// Scanned for broad-scope queries or when the primary scan finds nothing.
    pub secondary_wide: Vec<String>,
    /// Number of fragments returned per search.
    pub top_k: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Maximum number of users tracked at once (least recently active is evicted)
    pub max_users: usize,
    /// Maximum entries kept after the system preamble
    pub max_history_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "openai" or "ollama"
    pub provider: String,
    /// Full chat endpoint URL; provider default when unset
    pub api_url: Option<String>,
    /// Model name for chat
    pub chat_model: String,
    /// API key (only needed for cloud providers)
    pub api_key: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
    /// Request timeout in seconds (capped at 120)
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            debug: false,
            corpus: CorpusConfig::default(),
            conversation: ConversationConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            primary: vec!["pdf_chunks_part8".to_string(), "pdf_chunks_part9".to_string()],
            secondary_wide: (1..=7).map(|i| format!("pdf_chunks_part{i}")).collect(),
            top_k: 3,
        }
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            max_users: 1000,
            max_history_length: 10,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_url: None,
            chat_model: "gpt-3.5-turbo".to_string(),
            api_key: None,
            max_tokens: 250,
            temperature: 0.7,
            presence_penalty: 0.5,
            frequency_penalty: 0.5,
            timeout_secs: 30,
        }
    }
}

impl LlmConfig {
    /// Chat endpoint, falling back to the provider's well-known URL.
    pub fn endpoint(&self) -> String {
        if let Some(url) = &self.api_url {
            return url.clone();
        }
        match self.provider.as_str() {
            "ollama" => "http://localhost:11434/api/chat".to_string(),
            _ => "https://api.openai.com/v1/chat/completions".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(5000);
        config.bind_addr = format!("{host}:{port}");

        if let Ok(val) = std::env::var("DEBUG") {
            config.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "t");
        }

        // Corpus
        if let Ok(dir) = std::env::var("CORPUS_DIR") {
            config.corpus.root = PathBuf::from(dir);
        }
        if let Ok(val) = std::env::var("PRIMARY_FOLDERS") {
            config.corpus.primary = parse_list(&val);
        }
        if let Ok(val) = std::env::var("SECONDARY_FOLDERS") {
            config.corpus.secondary_wide = parse_list(&val);
        }
        if let Ok(val) = std::env::var("SEARCH_TOP_K") {
            if let Ok(v) = val.parse() {
                config.corpus.top_k = v;
            }
        }

        // Conversations
        if let Ok(val) = std::env::var("MAX_USERS") {
            if let Ok(v) = val.parse::<usize>() {
                config.conversation.max_users = v.max(1);
            }
        }
        if let Ok(val) = std::env::var("MAX_HISTORY_LENGTH") {
            if let Ok(v) = val.parse() {
                config.conversation.max_history_length = v;
            }
        }

        // LLM
        if let Ok(provider) = std::env::var("LLM_PROVIDER") {
            config.llm.provider = provider.to_lowercase();
        }
        if let Ok(url) = std::env::var("GPT_API_URL") {
            config.llm.api_url = Some(url);
        }
        if let Ok(key) = std::env::var("GPT_API_KEY") {
            if !key.trim().is_empty() {
                config.llm.api_key = Some(key);
            }
        }
        if let Ok(model) = std::env::var("GPT_MODEL") {
            config.llm.chat_model = model;
        }
        if let Ok(val) = std::env::var("MAX_TOKENS") {
            if let Ok(v) = val.parse() {
                config.llm.max_tokens = v;
            }
        }
        if let Ok(val) = std::env::var("TEMPERATURE") {
            if let Ok(v) = val.parse() {
                config.llm.temperature = v;
            }
        }
        if let Ok(val) = std::env::var("PRESENCE_PENALTY") {
            if let Ok(v) = val.parse() {
                config.llm.presence_penalty = v;
            }
        }
        if let Ok(val) = std::env::var("FREQUENCY_PENALTY") {
            if let Ok(v) = val.parse() {
                config.llm.frequency_penalty = v;
            }
        }
        if let Ok(val) = std::env::var("LLM_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.llm.timeout_secs = v.min(120);
            }
        }

        config
    }

    /// Refuse to start with a configuration that cannot reach the LLM.
    pub fn validate(&self) -> anyhow::Result<()> {
        match self.llm.provider.as_str() {
            "openai" => {
                if self.llm.api_key.is_none() {
                    anyhow::bail!("API key not found: set GPT_API_KEY (or a .env file)");
                }
            }
            "ollama" => {}
            other => anyhow::bail!("Unsupported LLM provider: {other}"),
        }
        if self.corpus.primary.is_empty() && self.corpus.secondary_wide.is_empty() {
            anyhow::bail!("No corpus folders configured");
        }
        Ok(())
    }

    pub fn folder_path(&self, folder: &str) -> PathBuf {
        self.corpus.root.join(folder)
    }
}

fn parse_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
