//! Language-model access: the client trait the chat service depends on and its HTTP implementation.

pub mod client;

use async_trait::async_trait;

use crate::config::LlmConfig;
use crate::models::ChatMessage;

pub use client::HttpChatClient;

/// Sampling parameters sent with every completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
}

impl From<&LlmConfig> for GenerationParams {
    fn from(config: &LlmConfig) -> Self {
        Self {
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            presence_penalty: config.presence_penalty,
            frequency_penalty: config.frequency_penalty,
        }
    }
}

/// Ways a completion request can fail. Each maps to its own user-facing reply.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("LLM request timed out")]
    Timeout,
    #[error("Failed to reach the LLM API: {0}")]
    Connection(String),
    #[error("LLM API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Malformed LLM response: {0}")]
    Malformed(String),
    #[error("LLM client error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else if e.is_decode() {
            LlmError::Malformed(e.to_string())
        } else if e.is_connect() || e.is_request() {
            LlmError::Connection(e.to_string())
        } else {
            LlmError::Other(e.to_string())
        }
    }
}

/// Anything that can turn an ordered chat history into the assistant's next message.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Returns the completion text, which may be empty.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<String, LlmError>;
}
