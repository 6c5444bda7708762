pub mod config;
pub mod evaluation;
pub mod pipeline;
pub mod test_case;

pub use config::{
    Config, DocumentConfig, FallbackConfig, GenerationConfig, LlmConfig, LoggingConfig,
    PromptsConfig,
};
pub use evaluation::{EvaluationScore, MAX_SCORE, MIN_SCORE};
pub use pipeline::{
    ChainExecution, ChainValidationError, Pipeline, PipelineMode, StageOutput, StageSpec,
};
pub use test_case::{StepList, TestCase};
