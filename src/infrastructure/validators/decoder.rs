//! Typed decoding of sanitized model output

use serde_json::Value;
use tracing::{debug, warn};

use super::sanitizer::ResponseSanitizer;
use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::{EvaluationScore, TestCase};

/// Decodes raw model text into domain records
#[derive(Debug, Clone, Default)]
pub struct ResponseDecoder {
    sanitizer: ResponseSanitizer,
}

impl ResponseDecoder {
    /// Create a decoder using the standard sanitizer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with a custom sanitizer
    pub fn with_sanitizer(sanitizer: ResponseSanitizer) -> Self {
        Self { sanitizer }
    }

    /// Decode a JSON array of test cases
    ///
    /// An empty array is reported as [`PipelineError::EmptyResult`].
    pub fn decode_test_cases(&self, raw: &str) -> PipelineResult<Vec<TestCase>> {
        let cleaned = self.sanitizer.sanitize(raw);
        let cases: Vec<TestCase> = serde_json::from_str(&cleaned).map_err(|e| {
            warn!(
                error = %e,
                output_preview = %preview(&cleaned),
                "Failed to decode test case array"
            );
            PipelineError::MalformedResponse(e.to_string())
        })?;

        if cases.is_empty() {
            return Err(PipelineError::EmptyResult);
        }

        debug!(case_count = cases.len(), "Decoded test cases");
        Ok(cases)
    }

    /// Decode an evaluation score object
    ///
    /// Falls back to the first element when the model answered with an array.
    /// Missing or out-of-range dimensions are reset to 0.
    pub fn decode_score(&self, raw: &str) -> PipelineResult<EvaluationScore> {
        let cleaned = self.sanitizer.sanitize(raw);
        let value: Value = serde_json::from_str(&cleaned).map_err(|e| {
            warn!(
                error = %e,
                output_preview = %preview(&cleaned),
                "Failed to decode evaluation output"
            );
            PipelineError::MalformedResponse(e.to_string())
        })?;

        let object = match value {
            Value::Object(_) => value,
            Value::Array(items) => {
                debug!("Evaluation output is an array, using first element");
                items
                    .into_iter()
                    .next()
                    .filter(Value::is_object)
                    .ok_or_else(|| {
                        PipelineError::MalformedResponse(
                            "array does not start with a score object".to_string(),
                        )
                    })?
            }
            other => {
                return Err(PipelineError::MalformedResponse(format!(
                    "expected a score object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let score: EvaluationScore = serde_json::from_value(object)?;
        let normalized = score.normalized();
        if normalized != score {
            debug!(?score, "Reset missing or out-of-range score fields to 0");
        }
        Ok(normalized)
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn preview(text: &str) -> String {
    text.chars().take(200).collect()
}
