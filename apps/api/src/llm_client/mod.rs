//! LLM Client — the single point of entry for all chat-completion calls.
//!
//! ARCHITECTURAL RULE: No other module may call the model endpoint directly.
//! Handlers hold an `Arc<dyn ChatModel>` so tests can substitute a scripted model.
//!
//! Every call is independent: no retry, no caching. A failed call surfaces as
//! `LlmError` and the caller decides how to display it.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Model request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model service rejected the API key (status {status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("Rate limited by model service: {0}")]
    RateLimited(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed model response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Model returned empty content")]
    EmptyContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One chat-completion request. Serializes directly as the OpenAI-compatible body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The chat model seam. Production uses `GroqClient`.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends one request and returns the trimmed response text.
    async fn chat(&self, request: &ChatRequest) -> Result<String, LlmError>;
}

/// Client for Groq's OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
    url: String,
    timeout: Duration,
}

impl GroqClient {
    pub fn new(api_key: String, url: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            url,
            timeout,
        })
    }

    /// A deadline hit while sending or while reading the body is a timeout.
    fn transport_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout(self.timeout)
        } else {
            LlmError::Http(e)
        }
    }
}

#[async_trait]
impl ChatModel for GroqClient {
    async fn chat(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("Model API returned {}: {}", status, message);
            return Err(match status.as_u16() {
                401 | 403 => LlmError::Unauthorized {
                    status: status.as_u16(),
                    message,
                },
                429 => LlmError::RateLimited(message),
                code => LlmError::Api {
                    status: code,
                    message,
                },
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;
        parse_chat_response(&body)
    }
}

/// Extracts the first choice's text from a chat-completions body.
fn parse_chat_response(body: &str) -> Result<String, LlmError> {
    let parsed: ChatResponse = serde_json::from_str(body)?;

    if let Some(usage) = &parsed.usage {
        debug!(
            "Model call succeeded: prompt_tokens={}, completion_tokens={}",
            usage.prompt_tokens, usage.completion_tokens
        );
    }

    let text = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|t| t.trim().to_string())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    Ok(text)
}
