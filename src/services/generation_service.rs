//! Test case generation service
//!
//! Runs the configured stage chain and decodes its final output. Any failure
//! along the way is answered with the rule-based cases for the same input.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::chain_executor::ChainExecutor;
use super::fallback_generator::FallbackGenerator;
use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::{Config, Pipeline, TestCase};
use crate::domain::ports::ChatClientFactory;
use crate::infrastructure::prompts::PromptStore;
use crate::infrastructure::validators::ResponseDecoder;

/// Where a set of generated cases came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CaseSource {
    /// Decoded from the model chain
    Model,
    /// Produced by the rule-based generator
    Fallback {
        /// Why the model path was not used
        reason: String,
    },
}

impl fmt::Display for CaseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model => f.write_str("model"),
            Self::Fallback { reason } => write!(f, "rule-based fallback ({reason})"),
        }
    }
}

/// Generated cases together with their origin
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Generated cases, never empty
    pub cases: Vec<TestCase>,
    /// Model or fallback
    pub source: CaseSource,
}

/// Requirements-to-test-cases generator
#[derive(Clone)]
pub struct TestCaseGenerator {
    executor: ChainExecutor,
    pipeline: Pipeline,
    fallback: FallbackGenerator,
    decoder: ResponseDecoder,
}

impl TestCaseGenerator {
    /// Create a generator from its collaborators
    pub fn new(executor: ChainExecutor, pipeline: Pipeline, fallback: FallbackGenerator) -> Self {
        Self {
            executor,
            pipeline,
            fallback,
            decoder: ResponseDecoder::new(),
        }
    }

    /// Wire a generator from configuration
    pub fn from_config(
        config: &Config,
        prompts: &PromptStore,
        factory: Arc<dyn ChatClientFactory>,
    ) -> Self {
        Self::new(
            ChainExecutor::new(config.llm.clone(), factory),
            prompts.generation_pipeline(config.generation.pipeline),
            FallbackGenerator::new(config.fallback.clone()),
        )
    }

    /// Generate test cases for `prd`; never fails and never returns an empty list
    pub async fn generate(&self, prd: &str) -> Vec<TestCase> {
        self.generate_with_source(prd).await.cases
    }

    /// Generate test cases and report whether the model or the fallback produced them
    #[instrument(
        skip(self, prd),
        fields(
            request_id = %Uuid::new_v4(),
            pipeline = %self.pipeline.name,
            prd_length = prd.chars().count()
        )
    )]
    pub async fn generate_with_source(&self, prd: &str) -> GenerationOutcome {
        match self.generate_with_model(prd).await {
            Ok(cases) => {
                info!(case_count = cases.len(), "Generated test cases with model");
                GenerationOutcome {
                    cases,
                    source: CaseSource::Model,
                }
            }
            Err(err) => {
                match &err {
                    PipelineError::ConfigurationIncomplete(reason) => {
                        warn!(reason = %reason, "Model path unavailable, using rule-based generator");
                    }
                    other => {
                        error!(reason = %other, "Model generation failed, using rule-based generator");
                    }
                }
                GenerationOutcome {
                    cases: self.fallback.generate(prd),
                    source: CaseSource::Fallback {
                        reason: err.to_string(),
                    },
                }
            }
        }
    }

    async fn generate_with_model(&self, prd: &str) -> PipelineResult<Vec<TestCase>> {
        let execution = self.executor.run(&self.pipeline, prd).await?;
        let output = execution.final_output().ok_or(PipelineError::EmptyResult)?;
        self.decoder.decode_test_cases(output)
    }
}
