//! Common test utilities for integration tests
//!
//! Shared fixtures for the fake chat-completion and document endpoints.

#![allow(dead_code)]

use casegen::domain::models::{Config, LlmConfig};

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Config with the remote path enabled against `base_url`
pub fn ready_config(base_url: &str) -> Config {
    Config {
        llm: LlmConfig {
            enabled: true,
            api_key: Some("test-api-key".to_string()),
            model: Some("test-model".to_string()),
            base_url: base_url.to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Chat-completion response body carrying `content` as the first choice
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "resp-1",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 20}
    })
    .to_string()
}
