use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while retrieving a document's plain text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("Document URL is empty")]
    EmptyUrl,

    #[error("Cannot extract a document id from URL: {0}")]
    UnrecognizedUrl(String),

    #[error("Document platform credentials are not configured")]
    MissingCredentials,

    #[error("Document platform error (code {code}): {message}")]
    Api { code: i64, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unreadable response: {0}")]
    InvalidResponse(String),

    #[error("Document has no text content")]
    EmptyDocument,
}

/// Port for fetching the plain text of a hosted document
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Resolve `url` to a document and return its raw text
    async fn fetch(&self, url: &str) -> Result<String, DocumentError>;
}
