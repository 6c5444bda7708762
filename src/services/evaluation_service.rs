//! Test case set scoring

use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::chain_executor::ChainExecutor;
use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::{Config, EvaluationScore, Pipeline, TestCase};
use crate::domain::ports::ChatClientFactory;
use crate::infrastructure::prompts::PromptStore;
use crate::infrastructure::validators::ResponseDecoder;

/// Scores a set of test cases against a requirements document with one model call
#[derive(Clone)]
pub struct EvaluationScorer {
    executor: ChainExecutor,
    pipeline: Pipeline,
    decoder: ResponseDecoder,
}

impl EvaluationScorer {
    /// Create a scorer from its collaborators
    pub fn new(executor: ChainExecutor, pipeline: Pipeline) -> Self {
        Self {
            executor,
            pipeline,
            decoder: ResponseDecoder::new(),
        }
    }

    /// Wire a scorer from configuration
    pub fn from_config(
        config: &Config,
        prompts: &PromptStore,
        factory: Arc<dyn ChatClientFactory>,
    ) -> Self {
        Self::new(
            ChainExecutor::new(config.llm.clone(), factory),
            prompts.evaluation_pipeline(),
        )
    }

    /// Score `cases`; any failure yields the all-zero score
    #[instrument(
        skip(self, prd, cases),
        fields(request_id = %Uuid::new_v4(), prd_length = prd.chars().count(), case_count = cases.len())
    )]
    pub async fn evaluate(&self, prd: &str, cases: &[TestCase]) -> EvaluationScore {
        match self.evaluate_with_model(prd, cases).await {
            Ok(score) => {
                info!(?score, total = ?score.total_score(), "Evaluation completed");
                score
            }
            Err(PipelineError::ConfigurationIncomplete(reason)) => {
                warn!(reason = %reason, "Evaluation unavailable, returning default score");
                EvaluationScore::zero()
            }
            Err(err) => {
                error!(reason = %err, "Evaluation failed, returning default score");
                EvaluationScore::zero()
            }
        }
    }

    async fn evaluate_with_model(
        &self,
        prd: &str,
        cases: &[TestCase],
    ) -> PipelineResult<EvaluationScore> {
        let message = build_user_message(prd, cases);
        let execution = self.executor.run(&self.pipeline, &message).await?;
        let output = execution.final_output().ok_or(PipelineError::EmptyResult)?;
        self.decoder.decode_score(output)
    }
}

/// User message carrying the document and the cases under review
pub fn build_user_message(prd: &str, cases: &[TestCase]) -> String {
    let rendered = serde_json::to_string(cases).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to serialize test cases, using text listing");
        render_cases_as_text(cases)
    });
    format!("PRD content:\n{prd}\n\nTest cases to evaluate:\n{rendered}")
}

/// Plain-text enumeration of `cases`
pub fn render_cases_as_text(cases: &[TestCase]) -> String {
    let mut out = String::new();
    for (idx, case) in cases.iter().enumerate() {
        let _ = write!(
            out,
            "\nTest case {}:\nTitle: {}\nPrecondition: {}\nSteps: {}\nExpected result: {}\n",
            idx + 1,
            case.title,
            case.precondition,
            case.steps,
            case.expected_result
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::LlmConfig;
    use crate::domain::ports::ChatError;
    use crate::infrastructure::llm::ScriptedChatClientFactory;

    fn scorer(factory: &ScriptedChatClientFactory) -> EvaluationScorer {
        let config = Config {
            llm: LlmConfig {
                enabled: true,
                api_key: Some("key".to_string()),
                model: Some("model".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        EvaluationScorer::from_config(&config, &PromptStore::builtin(), Arc::new(factory.clone()))
    }

    fn cases() -> Vec<TestCase> {
        vec![TestCase::new("Login", "none", "open page", "shown")]
    }

    #[tokio::test]
    async fn test_scores_and_releases_on_success() {
        let factory = ScriptedChatClientFactory::new()
            .with_reply("{\"coverage\": 4, \"quality\": 5, \"nonRedundancy\": 3}");

        let score = scorer(&factory).evaluate("prd", &cases()).await;

        assert_eq!(score, EvaluationScore::new(4, 5, 3));
        assert_eq!(score.total_score(), Some(4.0));
        assert_eq!(factory.call_count(), 1);
        assert_eq!(factory.release_count(), 1);

        let user = factory.requests()[0].user_content().unwrap().to_string();
        assert!(user.starts_with("PRD content:\nprd\n\nTest cases to evaluate:\n["));
        assert!(user.contains("\"expectedResult\":\"shown\""));
    }

    #[tokio::test]
    async fn test_decode_failure_returns_zero_and_releases() {
        let factory = ScriptedChatClientFactory::new().with_reply("Looks good to me!");
        let score = scorer(&factory).evaluate("prd", &cases()).await;

        assert_eq!(score, EvaluationScore::zero());
        assert_eq!(factory.release_count(), 1);
    }

    #[tokio::test]
    async fn test_call_failure_returns_zero_and_releases() {
        let factory = ScriptedChatClientFactory::new().with_failure(ChatError::Timeout);
        let score = scorer(&factory).evaluate("prd", &cases()).await;

        assert_eq!(score, EvaluationScore::zero());
        assert_eq!(factory.release_count(), 1);
    }

    #[tokio::test]
    async fn test_disabled_returns_zero_without_calls() {
        let factory = ScriptedChatClientFactory::new();
        let scorer = EvaluationScorer::from_config(
            &Config::default(),
            &PromptStore::builtin(),
            Arc::new(factory.clone()),
        );

        assert_eq!(scorer.evaluate("prd", &cases()).await, EvaluationScore::zero());
        assert_eq!(factory.clients_created(), 0);
    }

    #[tokio::test]
    async fn test_array_answer_and_out_of_range_fields() {
        let factory = ScriptedChatClientFactory::new()
            .with_reply("[{\"coverage\": 12, \"quality\": 3, \"nonRedundancy\": 2}]");
        let score = scorer(&factory).evaluate("prd", &cases()).await;
        assert_eq!(score, EvaluationScore::new(0, 3, 2));
    }

    #[test]
    fn test_render_cases_as_text() {
        let text = render_cases_as_text(&cases());
        assert_eq!(
            text,
            "\nTest case 1:\nTitle: Login\nPrecondition: none\nSteps: open page\nExpected result: shown\n"
        );
    }
}
