//! Service layer
//!
//! Orchestrates the model path and the rule-based fallback.

pub mod chain_executor;
pub mod evaluation_service;
pub mod fallback_generator;
pub mod generation_service;

pub use chain_executor::ChainExecutor;
pub use evaluation_service::EvaluationScorer;
pub use fallback_generator::FallbackGenerator;
pub use generation_service::{CaseSource, GenerationOutcome, TestCaseGenerator};
