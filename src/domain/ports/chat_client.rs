use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::models::LlmConfig;

/// A single message in a chat-completion exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message author ("system" or "user")
    pub role: String,

    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// System instruction message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// User message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Provider-neutral chat-completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier
    pub model: String,

    /// System message first, then the user message
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature
    pub temperature: f64,

    /// Output token cap
    pub max_tokens: u32,

    /// Whether the provider's extended reasoning mode is requested
    pub extended_reasoning: bool,
}

impl ChatRequest {
    /// Build a system + user request using the decoding parameters in `config`
    pub fn from_config(
        config: &LlmConfig,
        system_prompt: impl Into<String>,
        user_message: impl Into<String>,
    ) -> Self {
        Self {
            model: config.model.clone().unwrap_or_default(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_message),
            ],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            extended_reasoning: config.extended_reasoning,
        }
    }

    /// Content of the user message, if any
    pub fn user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
    }
}

/// Provider-neutral chat-completion response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Text of the first choice, trimmed; empty when the provider returned none
    pub content: String,
}

/// Errors surfaced by chat-completion adapters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("Client construction failed: {0}")]
    ClientSetup(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out")]
    Timeout,

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unreadable response: {0}")]
    InvalidResponse(String),
}

/// Port for one request/response exchange with a chat-completion service
///
/// Clients are obtained per invocation from a [`ChatClientFactory`] and
/// released exactly once when the invocation is over.
#[async_trait]
pub trait ChatCompletionClient: Send + Sync {
    /// Send one request and wait for the complete response
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ChatError>;

    /// Give back any resources held by the client
    fn release(&mut self);
}

/// Creates a fresh [`ChatCompletionClient`] for each invocation
pub trait ChatClientFactory: Send + Sync {
    /// Build a client configured from `config`
    fn create(&self, config: &LlmConfig) -> Result<Box<dyn ChatCompletionClient>, ChatError>;
}
