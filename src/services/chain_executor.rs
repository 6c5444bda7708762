//! Stage chain execution
//!
//! Runs a [`Pipeline`] against a chat-completion client, feeding each stage's
//! raw output into the next stage's user message.

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::{ChainExecution, LlmConfig, Pipeline, StageOutput};
use crate::domain::ports::{ChatClientFactory, ChatCompletionClient, ChatError, ChatRequest};

/// Holds the per-invocation client and releases it when dropped
struct ClientLease {
    client: Box<dyn ChatCompletionClient>,
}

impl ClientLease {
    fn acquire(factory: &dyn ChatClientFactory, config: &LlmConfig) -> Result<Self, ChatError> {
        Ok(Self {
            client: factory.create(config)?,
        })
    }

    fn client(&self) -> &dyn ChatCompletionClient {
        self.client.as_ref()
    }
}

impl Drop for ClientLease {
    fn drop(&mut self) {
        self.client.release();
    }
}

/// Sequential executor for stage chains
#[derive(Clone)]
pub struct ChainExecutor {
    llm: LlmConfig,
    factory: Arc<dyn ChatClientFactory>,
}

impl ChainExecutor {
    /// Create an executor that leases clients from `factory`
    pub fn new(llm: LlmConfig, factory: Arc<dyn ChatClientFactory>) -> Self {
        Self { llm, factory }
    }

    /// LLM settings used for every call
    pub fn llm_config(&self) -> &LlmConfig {
        &self.llm
    }

    /// Execute every stage in order
    ///
    /// One client is created for the whole run and released on every exit
    /// path. The first failed or empty stage aborts the run.
    #[instrument(skip(self, pipeline, input), fields(pipeline = %pipeline.name, stages = pipeline.stages.len()))]
    pub async fn run(&self, pipeline: &Pipeline, input: &str) -> PipelineResult<ChainExecution> {
        pipeline.validate()?;

        if let Some(issue) = self.llm.readiness_issue() {
            return Err(PipelineError::ConfigurationIncomplete(issue.to_string()));
        }

        let first_stage = pipeline.stages[0].id.clone();
        let lease = ClientLease::acquire(self.factory.as_ref(), &self.llm).map_err(|e| {
            PipelineError::ExternalCallFailure {
                stage: first_stage,
                reason: e.to_string(),
            }
        })?;

        let mut execution = ChainExecution::default();
        let mut current_input = input.to_string();
        let total = pipeline.stages.len();

        for (index, stage) in pipeline.stages.iter().enumerate() {
            info!(stage = %stage.id, step = index + 1, total, "Executing stage");

            let user_message = stage.render_user_message(&current_input);
            let request = ChatRequest::from_config(&self.llm, &stage.system_prompt, user_message);

            let started = Instant::now();
            let response = lease.client().complete(request).await.map_err(|e| {
                warn!(stage = %stage.id, error = %e, "Stage call failed");
                PipelineError::ExternalCallFailure {
                    stage: stage.id.clone(),
                    reason: e.to_string(),
                }
            })?;
            let duration = started.elapsed();

            if response.content.trim().is_empty() {
                warn!(stage = %stage.id, "Stage returned empty content");
                return Err(PipelineError::ExternalCallFailure {
                    stage: stage.id.clone(),
                    reason: "empty response".to_string(),
                });
            }

            debug!(
                stage = %stage.id,
                output_length = response.content.len(),
                duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
                "Stage completed"
            );

            current_input.clone_from(&response.content);
            execution.add_output(StageOutput {
                stage_id: stage.id.clone(),
                content: response.content,
                duration,
            });
        }

        info!(
            total_ms = u64::try_from(execution.total_duration().as_millis()).unwrap_or(u64::MAX),
            "Pipeline completed"
        );
        Ok(execution)
    }
}
