//! Chat-completion adapter
//!
//! - `HttpChatClient`: reqwest client for OpenAI-compatible endpoints
//! - `HttpChatClientFactory`: fresh client per invocation
//! - `LlmApiError`: status-classified HTTP errors
//! - `ScriptedChatClientFactory`: scripted client for tests

pub mod client;
pub mod errors;
pub mod mock;
pub mod types;

pub use client::{HttpChatClient, HttpChatClientFactory};
pub use errors::LlmApiError;
pub use mock::{ScriptedChatClientFactory, ScriptedReply};
