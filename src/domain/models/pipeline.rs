//! Stage pipeline domain models
//!
//! A pipeline is an ordered list of model-call stages. Each stage renders its
//! user message from the previous stage's raw output; only the last stage's
//! output is ever decoded into a typed structure.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

/// Placeholder replaced by the stage input when rendering a user message
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Which generation pipeline the generator runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineMode {
    /// Decomposition, coverage planning, case synthesis
    #[default]
    ThreeStage,
    /// One call straight from requirements to cases
    SingleCall,
}

/// One link of a stage chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSpec {
    /// Stage identifier, used in logs and errors
    pub id: String,
    /// System prompt sent with this stage
    pub system_prompt: String,
    /// User message template; `{input}` receives the stage input
    pub user_template: String,
}

impl StageSpec {
    /// Stage whose user message is exactly its input
    pub fn new(id: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            system_prompt: system_prompt.into(),
            user_template: INPUT_PLACEHOLDER.to_string(),
        }
    }

    /// Override the user message template
    #[must_use]
    pub fn with_user_template(mut self, template: impl Into<String>) -> Self {
        self.user_template = template.into();
        self
    }

    /// Render the user message for this stage
    ///
    /// Templates without a placeholder get the input appended on a new line.
    pub fn render_user_message(&self, input: &str) -> String {
        if self.user_template.contains(INPUT_PLACEHOLDER) {
            self.user_template.replace(INPUT_PLACEHOLDER, input)
        } else if self.user_template.is_empty() {
            input.to_string()
        } else {
            format!("{}\n{input}", self.user_template)
        }
    }
}

/// An ordered stage chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    /// Human-readable name
    pub name: String,
    /// Stages, executed strictly in order
    pub stages: Vec<StageSpec>,
}

impl Pipeline {
    /// Create a pipeline from an ordered list of stages
    pub fn new(name: impl Into<String>, stages: Vec<StageSpec>) -> Self {
        Self {
            name: name.into(),
            stages,
        }
    }

    /// Validate the stage list
    pub fn validate(&self) -> Result<(), ChainValidationError> {
        if self.stages.is_empty() {
            return Err(ChainValidationError::EmptyChain);
        }

        let mut seen = HashSet::new();
        for stage in &self.stages {
            if stage.id.trim().is_empty() {
                return Err(ChainValidationError::BlankStageId);
            }
            if !seen.insert(stage.id.as_str()) {
                return Err(ChainValidationError::DuplicateStage {
                    stage_id: stage.id.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Structural problems with a pipeline definition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainValidationError {
    #[error("Pipeline has no stages")]
    EmptyChain,

    #[error("Pipeline contains a stage with a blank id")]
    BlankStageId,

    #[error("Stage '{stage_id}' appears more than once")]
    DuplicateStage { stage_id: String },
}

/// Raw output of one executed stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutput {
    /// Stage that produced the output
    pub stage_id: String,
    /// Trimmed model text, never decoded here
    pub content: String,
    /// Wall-clock time spent in the call
    pub duration: Duration,
}

/// Result of a fully executed pipeline
#[derive(Debug, Clone, Default)]
pub struct ChainExecution {
    /// Outputs in stage order
    pub outputs: Vec<StageOutput>,
}

impl ChainExecution {
    /// Record a completed stage
    pub fn add_output(&mut self, output: StageOutput) {
        self.outputs.push(output);
    }

    /// Output of the last stage, the only one callers decode
    pub fn final_output(&self) -> Option<&str> {
        self.outputs.last().map(|o| o.content.as_str())
    }

    /// Total time spent across all stages
    pub fn total_duration(&self) -> Duration {
        self.outputs.iter().map(|o| o.duration).sum()
    }
}
