//! Wire types for the OpenAI-compatible chat-completion endpoint

use serde::{Deserialize, Serialize};

use crate::domain::ports::{ChatMessage, ChatRequest};

/// Body of `POST {base_url}/chat/completions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,

    /// Conversation messages
    pub messages: Vec<WireMessage>,

    /// Sampling temperature
    pub temperature: f64,

    /// Output token cap
    pub max_tokens: u32,

    /// Provider reasoning switch
    pub thinking: Thinking,
}

/// Message as sent on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

/// Reasoning switch: `{"type": "enabled" | "disabled"}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thinking {
    #[serde(rename = "type")]
    pub mode: String,
}

impl Thinking {
    pub fn new(enabled: bool) -> Self {
        Self {
            mode: if enabled { "enabled" } else { "disabled" }.to_string(),
        }
    }
}

impl From<&ChatMessage> for WireMessage {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role.clone(),
            content: message.content.clone(),
        }
    }
}

impl From<&ChatRequest> for CompletionRequest {
    fn from(request: &ChatRequest) -> Self {
        Self {
            model: request.model.clone(),
            messages: request.messages.iter().map(WireMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            thinking: Thinking::new(request.extended_reasoning),
        }
    }
}

/// Response body; only the fields the adapter reads are modeled
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub choices: Vec<Choice>,

    #[serde(default)]
    pub usage: Option<Usage>,
}

impl CompletionResponse {
    /// Trimmed content of the first choice, empty when there is none
    pub fn first_content(&self) -> String {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,

    pub message: ResponseMessage,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,

    #[serde(default)]
    pub completion_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::LlmConfig;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let config = LlmConfig {
            model: Some("doubao".to_string()),
            ..Default::default()
        };
        let request = ChatRequest::from_config(&config, "sys", "user text");
        let body = serde_json::to_value(CompletionRequest::from(&request)).unwrap();

        assert_eq!(body["model"], json!("doubao"));
        assert_eq!(body["messages"][0], json!({"role": "system", "content": "sys"}));
        assert_eq!(body["messages"][1]["role"], json!("user"));
        assert_eq!(body["max_tokens"], json!(32000));
        assert_eq!(body["thinking"], json!({"type": "disabled"}));
    }

    #[test]
    fn test_first_content_trimmed_or_empty() {
        let response: CompletionResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": "  [] \n"}}]
        }))
        .unwrap();
        assert_eq!(response.first_content(), "[]");

        let empty: CompletionResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert_eq!(empty.first_content(), "");
    }
}
