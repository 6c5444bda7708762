//! casegen - requirements-to-test-case generator
//!
//! casegen turns a product requirements document (PRD) into structured test
//! cases through a chain of chat-completion calls, and scores existing case
//! sets against the document. When the remote model is unavailable or its
//! output is unusable, a deterministic rule-based generator answers instead,
//! so generation never fails.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, errors, and the ports to the outside world
//! - **Application Layer** (`application`): inbound operations and response envelopes
//! - **Service Layer** (`services`): stage chain execution, generation, evaluation, fallback
//! - **Infrastructure Layer** (`infrastructure`): config, logging, HTTP adapters, prompts, decoding
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use casegen::{Config, FallbackGenerator};
//!
//! let cases = FallbackGenerator::default().generate("功能：用户登录");
//! assert_eq!(cases.len(), 3);
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::{
    EvaluationRequest, EvaluationResponse, FetchDocumentRequest, FetchDocumentResponse,
    GenerateRequest, GenerateResponse, TestCaseApi,
};
pub use domain::models::{Config, EvaluationScore, Pipeline, StageSpec, StepList, TestCase};
pub use domain::ports::{ChatClientFactory, ChatCompletionClient, DocumentFetcher};
pub use domain::{PipelineError, PipelineResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{CaseSource, ChainExecutor, EvaluationScorer, FallbackGenerator, TestCaseGenerator};
