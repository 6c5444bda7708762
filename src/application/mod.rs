//! Application layer
//!
//! Inbound use cases with input validation and response envelopes.

pub mod test_case_api;

pub use test_case_api::{
    EvaluationRequest, EvaluationResponse, FetchDocumentRequest, FetchDocumentResponse,
    GenerateRequest, GenerateResponse, TestCaseApi,
};
