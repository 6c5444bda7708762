//! HTTP chat-completion client
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::errors::LlmApiError;
use super::types::{CompletionRequest, CompletionResponse};
use crate::domain::models::LlmConfig;
use crate::domain::ports::{
    ChatClientFactory, ChatCompletionClient, ChatError, ChatRequest, ChatResponse,
};
use crate::infrastructure::logging::SecretScrubber;

/// reqwest-backed client for an OpenAI-compatible `/chat/completions` endpoint
///
/// One instance serves a single invocation; `release` drops the underlying
/// connection pool.
pub struct HttpChatClient {
    http_client: Option<ReqwestClient>,
    api_key: String,
    base_url: String,
    scrubber: SecretScrubber,
}

impl HttpChatClient {
    /// Build a client from configuration
    pub fn from_config(config: &LlmConfig) -> Result<Self, ChatError> {
        let mut builder = ReqwestClient::builder().tcp_nodelay(true);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| ChatError::ClientSetup(e.to_string()))?;

        Ok(Self {
            http_client: Some(http_client),
            api_key: config.api_key.clone().unwrap_or_default(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            scrubber: SecretScrubber::new(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn send_request(
        &self,
        http_client: &ReqwestClient,
        body: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmApiError> {
        let response = http_client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            let body = self.scrubber.scrub_message(&body);
            warn!(status = status.as_u16(), body = %body, "Chat completion request failed");
            return Err(LlmApiError::from_status(status, body));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl ChatCompletionClient for HttpChatClient {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        let http_client = self
            .http_client
            .as_ref()
            .ok_or_else(|| ChatError::ClientSetup("client already released".to_string()))?;

        let body = CompletionRequest::from(&request);
        let response = self.send_request(http_client, &body).await?;
        let content = response.first_content();

        debug!(
            response_id = response.id.as_deref().unwrap_or(""),
            content_length = content.len(),
            "Chat completion received"
        );

        Ok(ChatResponse { content })
    }

    fn release(&mut self) {
        if self.http_client.take().is_some() {
            debug!("Chat client released");
        }
    }
}

/// Factory producing a fresh [`HttpChatClient`] per invocation
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpChatClientFactory;

impl ChatClientFactory for HttpChatClientFactory {
    fn create(&self, config: &LlmConfig) -> Result<Box<dyn ChatCompletionClient>, ChatError> {
        Ok(Box::new(HttpChatClient::from_config(config)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> LlmConfig {
        LlmConfig {
            enabled: true,
            api_key: Some("test-key".to_string()),
            model: Some("test-model".to_string()),
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_complete_posts_bearer_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"model": "test-model", "thinking": {"type": "disabled"}}"#.to_string(),
            ))
            .with_status(200)
            .with_body(r#"{"id": "r1", "choices": [{"message": {"content": " hello "}}]}"#)
            .create_async()
            .await;

        let client = HttpChatClient::from_config(&config(&server.url())).unwrap();
        let request = ChatRequest::from_config(&config(&server.url()), "sys", "hi");
        let response = client.complete(request).await.unwrap();

        assert_eq!(response.content, "hello");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_maps_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(503)
            .with_body("unavailable")
            .create_async()
            .await;

        let client = HttpChatClient::from_config(&config(&server.url())).unwrap();
        let request = ChatRequest::from_config(&config(&server.url()), "sys", "hi");
        let err = client.complete(request).await.unwrap_err();

        assert!(matches!(err, ChatError::Api { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_released_client_refuses_requests() {
        let mut client = HttpChatClient::from_config(&config("http://127.0.0.1:9")).unwrap();
        client.release();
        let request = ChatRequest::from_config(&config("http://127.0.0.1:9"), "sys", "hi");
        assert!(matches!(
            client.complete(request).await,
            Err(ChatError::ClientSetup(_))
        ));
    }
}
