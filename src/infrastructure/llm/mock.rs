//! Scripted chat client for testing

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::models::LlmConfig;
use crate::domain::ports::{
    ChatClientFactory, ChatCompletionClient, ChatError, ChatRequest, ChatResponse,
};

/// One scripted answer
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Content(String),
    Failure(ChatError),
}

#[derive(Debug, Default)]
struct ScriptState {
    replies: VecDeque<ScriptedReply>,
    requests: Vec<ChatRequest>,
    created: usize,
    released: usize,
    creation_failure: Option<ChatError>,
}

/// Factory whose clients answer from a shared script
///
/// Replies are consumed in order across every client it creates. Requests,
/// client creations and releases are recorded for assertions.
#[derive(Debug, Clone, Default)]
pub struct ScriptedChatClientFactory {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedChatClientFactory {
    /// Factory with an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply
    #[must_use]
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.lock()
            .replies
            .push_back(ScriptedReply::Content(content.into()));
        self
    }

    /// Queue a failed call
    #[must_use]
    pub fn with_failure(self, error: ChatError) -> Self {
        self.lock().replies.push_back(ScriptedReply::Failure(error));
        self
    }

    /// Make `create` itself fail
    #[must_use]
    pub fn failing_creation(self, error: ChatError) -> Self {
        self.lock().creation_failure = Some(error);
        self
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.lock().requests.clone()
    }

    /// Number of `complete` calls made
    pub fn call_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Number of clients handed out
    pub fn clients_created(&self) -> usize {
        self.lock().created
    }

    /// Number of clients released
    pub fn release_count(&self) -> usize {
        self.lock().released
    }

    fn lock(&self) -> MutexGuard<'_, ScriptState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ChatClientFactory for ScriptedChatClientFactory {
    fn create(&self, _config: &LlmConfig) -> Result<Box<dyn ChatCompletionClient>, ChatError> {
        let mut state = self.lock();
        if let Some(error) = state.creation_failure.clone() {
            return Err(error);
        }
        state.created += 1;
        Ok(Box::new(ScriptedChatClient {
            state: Arc::clone(&self.state),
            released: false,
        }))
    }
}

/// Client handed out by [`ScriptedChatClientFactory`]
#[derive(Debug)]
pub struct ScriptedChatClient {
    state: Arc<Mutex<ScriptState>>,
    released: bool,
}

#[async_trait]
impl ChatCompletionClient for ScriptedChatClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.requests.push(request);
        match state.replies.pop_front() {
            Some(ScriptedReply::Content(content)) => Ok(ChatResponse {
                content: content.trim().to_string(),
            }),
            Some(ScriptedReply::Failure(error)) => Err(error),
            None => Err(ChatError::Transport("no scripted reply left".to_string())),
        }
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .released += 1;
        }
    }
}
