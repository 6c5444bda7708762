//! Port trait definitions (Hexagonal Architecture)
//!
//! - `ChatCompletionClient` / `ChatClientFactory`: chat-completion calls
//! - `DocumentFetcher`: document text retrieval

pub mod chat_client;
pub mod document_fetcher;

pub use chat_client::{
    ChatClientFactory, ChatCompletionClient, ChatError, ChatMessage, ChatRequest, ChatResponse,
};
pub use document_fetcher::{DocumentError, DocumentFetcher};
