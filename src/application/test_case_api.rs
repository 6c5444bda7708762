//! Inbound operations and their response envelopes
//!
//! Every operation answers with `success`/`message` plus an optional payload.
//! Invalid input and fetch failures become `success = false`; nothing else is
//! surfaced as a fault because generation and evaluation always recover.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::models::{Config, EvaluationScore, TestCase};
use crate::domain::ports::{ChatClientFactory, DocumentFetcher};
use crate::infrastructure::prompts::PromptStore;
use crate::services::{CaseSource, EvaluationScorer, TestCaseGenerator};

/// Input of the generate operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Requirements document text
    #[serde(default)]
    pub prd: String,
}

/// Envelope returned by the generate operation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// Whether cases were produced
    pub success: bool,
    /// Human-readable outcome
    pub message: String,
    /// Generated cases, only present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_cases: Option<Vec<TestCase>>,
    /// Origin of the cases, only present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<CaseSource>,
}

impl GenerateResponse {
    /// Successful envelope carrying `test_cases`
    pub fn success(test_cases: Vec<TestCase>, source: CaseSource) -> Self {
        Self {
            success: true,
            message: "Generated successfully".to_string(),
            test_cases: Some(test_cases),
            source: Some(source),
        }
    }

    /// Failed envelope with no payload
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            test_cases: None,
            source: None,
        }
    }
}

/// Input of the evaluate operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    /// Requirements document text
    #[serde(default)]
    pub prd: String,
    /// Cases to score
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

/// Envelope returned by the evaluate operation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResponse {
    /// Whether a score was produced
    pub success: bool,
    /// Human-readable outcome
    pub message: String,
    /// Score, only present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<EvaluationScore>,
}

impl EvaluationResponse {
    /// Successful envelope carrying `score`
    pub fn success(score: EvaluationScore) -> Self {
        Self {
            success: true,
            message: "Evaluation completed".to_string(),
            score: Some(score),
        }
    }

    /// Failed envelope with no payload
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            score: None,
        }
    }
}

/// Input of the fetch operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchDocumentRequest {
    /// Document URL as pasted by the user
    #[serde(default)]
    pub url: String,
}

/// Envelope returned by the fetch operation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchDocumentResponse {
    /// Whether the document was read
    pub success: bool,
    /// Human-readable outcome
    pub message: String,
    /// Plain-text document body, only present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl FetchDocumentResponse {
    /// Successful envelope carrying the document text
    pub fn success(content: String) -> Self {
        Self {
            success: true,
            message: "Fetched successfully".to_string(),
            content: Some(content),
        }
    }

    /// Failed envelope with no payload
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            content: None,
        }
    }
}

/// Inbound boundary over the generator, the scorer and the document fetcher
#[derive(Clone)]
pub struct TestCaseApi {
    generator: TestCaseGenerator,
    scorer: EvaluationScorer,
    fetcher: Arc<dyn DocumentFetcher>,
}

impl TestCaseApi {
    /// Create the boundary from already wired collaborators
    pub fn new(
        generator: TestCaseGenerator,
        scorer: EvaluationScorer,
        fetcher: Arc<dyn DocumentFetcher>,
    ) -> Self {
        Self {
            generator,
            scorer,
            fetcher,
        }
    }

    /// Wire every collaborator from configuration
    pub fn from_config(
        config: &Config,
        prompts: &PromptStore,
        chat_factory: Arc<dyn ChatClientFactory>,
        fetcher: Arc<dyn DocumentFetcher>,
    ) -> Self {
        Self::new(
            TestCaseGenerator::from_config(config, prompts, Arc::clone(&chat_factory)),
            EvaluationScorer::from_config(config, prompts, chat_factory),
            fetcher,
        )
    }

    /// Generate cases for a non-blank PRD
    pub async fn generate(&self, request: GenerateRequest) -> GenerateResponse {
        if request.prd.trim().is_empty() {
            warn!("Rejected generate request with blank PRD");
            return GenerateResponse::error("PRD content must not be blank");
        }

        let outcome = self.generator.generate_with_source(&request.prd).await;
        info!(case_count = outcome.cases.len(), source = %outcome.source, "Generate request served");
        GenerateResponse::success(outcome.cases, outcome.source)
    }

    /// Score a non-empty case list against a non-blank PRD
    pub async fn evaluate(&self, request: EvaluationRequest) -> EvaluationResponse {
        if request.prd.trim().is_empty() {
            warn!("Rejected evaluate request with blank PRD");
            return EvaluationResponse::error("PRD content must not be blank");
        }
        if request.test_cases.is_empty() {
            warn!("Rejected evaluate request without test cases");
            return EvaluationResponse::error("Test case list must not be empty");
        }

        let score = self.scorer.evaluate(&request.prd, &request.test_cases).await;
        EvaluationResponse::success(score)
    }

    /// Read the document behind a non-blank URL
    pub async fn fetch_document(&self, request: FetchDocumentRequest) -> FetchDocumentResponse {
        if request.url.trim().is_empty() {
            warn!("Rejected fetch request with blank URL");
            return FetchDocumentResponse::error("Document URL must not be blank");
        }

        match self.fetcher.fetch(&request.url).await {
            Ok(content) => FetchDocumentResponse::success(content),
            Err(err) => {
                warn!(error = %err, "Document fetch failed");
                FetchDocumentResponse::error(format!("Failed to fetch document: {err}"))
            }
        }
    }
}
