//! Domain errors for the generation and evaluation pipelines.
//!
//! None of these escape the services: every variant is recovered by
//! substituting the rule-based cases or the default score.

use thiserror::Error;

use super::models::ChainValidationError;

/// Reasons a model-backed pipeline run did not produce a usable result
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("Configuration incomplete: {0}")]
    ConfigurationIncomplete(String),

    #[error("External call failed at stage '{stage}': {reason}")]
    ExternalCallFailure { stage: String, reason: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Model returned an empty result")]
    EmptyResult,

    #[error("Invalid pipeline: {0}")]
    InvalidPipeline(#[from] ChainValidationError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}
