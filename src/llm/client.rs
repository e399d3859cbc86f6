use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmConfig;
use crate::llm::{ChatClient, GenerationParams, LlmError};
use crate::models::ChatMessage;

/// Non-streaming chat completions over HTTP (OpenAI-compatible or Ollama).
pub struct HttpChatClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl HttpChatClient {
    pub fn new(config: LlmConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<String, LlmError> {
        match self.config.provider.as_str() {
            "openai" => self.complete_openai(messages, params).await,
            "ollama" => self.complete_ollama(messages, params).await,
            other => Err(LlmError::Other(format!("Unsupported LLM provider: {other}"))),
        }
    }
}

// ─── OpenAI-compatible ───────────────────────────────────

#[derive(Serialize)]
struct OpenAiChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
    presence_penalty: f32,
    frequency_penalty: f32,
}

#[derive(Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiErrorBody {
    error: OpenAiErrorDetail,
}

#[derive(Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

impl HttpChatClient {
    async fn complete_openai(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<String, LlmError> {
        let req = OpenAiChatRequest {
            model: &self.config.chat_model,
            messages,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            presence_penalty: params.presence_penalty,
            frequency_penalty: params.frequency_penalty,
        };

        let resp = self
            .http
            .post(self.config.endpoint())
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_key.as_deref().unwrap_or("")),
            )
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            let body = openai_error_message(&body).unwrap_or(body);
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_openai_reply(&body)
    }
}

/// Content of the first choice; a missing or null content is an empty reply.
fn parse_openai_reply(body: &str) -> Result<String, LlmError> {
    let parsed: OpenAiChatResponse =
        serde_json::from_str(body).map_err(|e| LlmError::Malformed(e.to_string()))?;
    Ok(parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default())
}

fn openai_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<OpenAiErrorBody>(body)
        .ok()
        .map(|b| b.error.message)
}

// ─── Ollama ──────────────────────────────────────────────

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    num_predict: u32,
    temperature: f32,
    presence_penalty: f32,
    frequency_penalty: f32,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: Option<OllamaMessage>,
}

#[derive(Deserialize)]
struct OllamaMessage {
    content: Option<String>,
}

impl HttpChatClient {
    async fn complete_ollama(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<String, LlmError> {
        let req = OllamaChatRequest {
            model: &self.config.chat_model,
            messages,
            stream: false,
            options: OllamaOptions {
                num_predict: params.max_tokens,
                temperature: params.temperature,
                presence_penalty: params.presence_penalty,
                frequency_penalty: params.frequency_penalty,
            },
        };

        let resp = self
            .http
            .post(self.config.endpoint())
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_ollama_reply(&body)
    }
}

fn parse_ollama_reply(body: &str) -> Result<String, LlmError> {
    let parsed: OllamaChatResponse =
        serde_json::from_str(body).map_err(|e| LlmError::Malformed(e.to_string()))?;
    Ok(parsed
        .message
        .and_then(|m| m.content)
        .unwrap_or_default())
}
