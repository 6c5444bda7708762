//! Lark (Feishu) docx adapter
//!
//! Exchanges the configured app credentials for a tenant access token, then
//! reads the document's raw text. A fresh HTTP client is built per fetch.

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{debug, info, instrument, warn};

use crate::domain::models::DocumentConfig;
use crate::domain::ports::{DocumentError, DocumentFetcher};

/// Patterns tried in order; the first capture group is the document id
static DOCUMENT_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"docx/([a-zA-Z0-9]+)",
        r"docs/([a-zA-Z0-9]+)",
        r"file_token=([a-zA-Z0-9]+)",
        r"open_file=([a-zA-Z0-9]+)",
        r"[^/]+/([a-zA-Z0-9]+)$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("document id pattern is valid"))
    .collect()
});

/// Trim the URL and drop stray backslashes left by copy-paste
pub fn clean_url(url: &str) -> String {
    url.trim().replace('\\', "")
}

/// Extract the document id from any supported URL shape
pub fn extract_document_id(url: &str) -> Option<String> {
    DOCUMENT_ID_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

#[derive(Debug, Serialize)]
struct TenantTokenRequest<'a> {
    app_id: &'a str,
    app_secret: &'a str,
}

#[derive(Debug, Deserialize)]
struct TenantTokenResponse {
    code: i64,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    tenant_access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawContentResponse {
    code: i64,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Option<RawContentData>,
}

#[derive(Debug, Deserialize)]
struct RawContentData {
    #[serde(default)]
    content: String,
}

/// [`DocumentFetcher`] backed by the Lark open platform
#[derive(Debug, Clone)]
pub struct LarkDocumentFetcher {
    config: DocumentConfig,
}

impl LarkDocumentFetcher {
    /// Create a fetcher for the configured document platform
    pub fn new(config: DocumentConfig) -> Self {
        Self { config }
    }

    fn credentials(&self) -> Result<(&str, &str), DocumentError> {
        match (self.config.app_id.as_deref(), self.config.app_secret.as_deref()) {
            (Some(id), Some(secret)) if !id.trim().is_empty() && !secret.trim().is_empty() => {
                Ok((id, secret))
            }
            _ => Err(DocumentError::MissingCredentials),
        }
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    async fn tenant_token(
        &self,
        client: &ReqwestClient,
        app_id: &str,
        app_secret: &str,
    ) -> Result<String, DocumentError> {
        let url = format!(
            "{}/open-apis/auth/v3/tenant_access_token/internal",
            self.base_url()
        );
        let response: TenantTokenResponse = client
            .post(url)
            .json(&TenantTokenRequest { app_id, app_secret })
            .send()
            .await
            .map_err(transport)?
            .json()
            .await
            .map_err(|e| DocumentError::InvalidResponse(e.to_string()))?;

        if response.code != 0 {
            return Err(DocumentError::Api {
                code: response.code,
                message: response.msg,
            });
        }

        response
            .tenant_access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DocumentError::InvalidResponse("missing tenant_access_token".to_string()))
    }

    async fn raw_content(
        &self,
        client: &ReqwestClient,
        token: &str,
        document_id: &str,
    ) -> Result<String, DocumentError> {
        let url = format!(
            "{}/open-apis/docx/v1/documents/{document_id}/raw_content",
            self.base_url()
        );
        let response: RawContentResponse = client
            .get(url)
            .query(&[("lang", "0")])
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?
            .json()
            .await
            .map_err(|e| DocumentError::InvalidResponse(e.to_string()))?;

        if response.code != 0 {
            warn!(code = response.code, msg = %response.msg, "Document platform rejected request");
            return Err(DocumentError::Api {
                code: response.code,
                message: response.msg,
            });
        }

        let content = response.data.map(|d| d.content).unwrap_or_default();
        if content.trim().is_empty() {
            return Err(DocumentError::EmptyDocument);
        }
        Ok(content)
    }
}

fn transport(err: reqwest::Error) -> DocumentError {
    DocumentError::Transport(err.to_string())
}

#[async_trait]
impl DocumentFetcher for LarkDocumentFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, DocumentError> {
        let url = clean_url(url);
        if url.is_empty() {
            return Err(DocumentError::EmptyUrl);
        }

        let document_id =
            extract_document_id(&url).ok_or_else(|| DocumentError::UnrecognizedUrl(url.clone()))?;
        debug!(document_id = %document_id, "Resolved document id");

        let (app_id, app_secret) = self.credentials()?;
        let client = ReqwestClient::builder().build().map_err(transport)?;

        let token = self.tenant_token(&client, app_id, app_secret).await?;
        let content = self.raw_content(&client, &token, &document_id).await?;

        info!(
            document_id = %document_id,
            content_length = content.len(),
            "Fetched document content"
        );
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_document_id_shapes() {
        assert_eq!(
            extract_document_id("https://acme.feishu.cn/docx/AbC123xyz").as_deref(),
            Some("AbC123xyz")
        );
        assert_eq!(
            extract_document_id("https://acme.feishu.cn/docs/doc42?from=share").as_deref(),
            Some("doc42")
        );
        assert_eq!(
            extract_document_id("https://acme.feishu.cn/drive?file_token=tok9&x=1").as_deref(),
            Some("tok9")
        );
        assert_eq!(
            extract_document_id("https://acme.feishu.cn/viewer?open_file=of77").as_deref(),
            Some("of77")
        );
        assert_eq!(
            extract_document_id("https://acme.feishu.cn/wiki/Wk88").as_deref(),
            Some("Wk88")
        );
        assert_eq!(extract_document_id("not a url at all"), None);
    }

    #[test]
    fn test_clean_url() {
        assert_eq!(
            clean_url("  https://acme.feishu.cn/docx/A\\B1  "),
            "https://acme.feishu.cn/docx/AB1"
        );
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let fetcher = LarkDocumentFetcher::new(DocumentConfig::default());
        assert_eq!(
            fetcher.fetch("https://acme.feishu.cn/docx/Abc").await,
            Err(DocumentError::MissingCredentials)
        );
    }

    #[tokio::test]
    async fn test_blank_and_unrecognized_urls() {
        let fetcher = LarkDocumentFetcher::new(DocumentConfig::default());
        assert_eq!(fetcher.fetch("   ").await, Err(DocumentError::EmptyUrl));
        assert!(matches!(
            fetcher.fetch("no-slashes-here").await,
            Err(DocumentError::UnrecognizedUrl(_))
        ));
    }
}
