//! Test case domain model
//!
//! A `TestCase` is one generated test scenario. Producers (the model chain and
//! the rule-based fallback) emit the `steps` field either as a single string or
//! as a list of strings, so `StepList` keeps whichever shape was produced.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Operation steps of a test case
///
/// Serialized untagged: `Single` is a bare JSON string, `Sequence` a JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepList {
    /// One free-text step description
    Single(String),
    /// Ordered list of step descriptions
    Sequence(Vec<String>),
}

impl StepList {
    /// Number of individual steps
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Sequence(steps) => steps.len(),
        }
    }

    /// True when there are no steps at all
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Sequence(steps) if steps.is_empty())
    }

    /// Iterate over the steps regardless of shape
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let steps: Vec<&str> = match self {
            Self::Single(step) => vec![step.as_str()],
            Self::Sequence(steps) => steps.iter().map(String::as_str).collect(),
        };
        steps.into_iter()
    }
}

impl Default for StepList {
    fn default() -> Self {
        Self::Sequence(Vec::new())
    }
}

impl From<&str> for StepList {
    fn from(step: &str) -> Self {
        Self::Single(step.to_string())
    }
}

impl From<Vec<String>> for StepList {
    fn from(steps: Vec<String>) -> Self {
        Self::Sequence(steps)
    }
}

impl fmt::Display for StepList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(step) => write!(f, "{step}"),
            Self::Sequence(steps) => write!(f, "[{}]", steps.join(", ")),
        }
    }
}

/// A generated test case
///
/// Missing or `null` fields decode as empty values so that partially-filled
/// model output still yields usable records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Short scenario title
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// State the system must be in before the steps run
    #[serde(default, deserialize_with = "null_as_default")]
    pub precondition: String,

    /// Operation steps
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: StepList,

    /// Observable outcome that makes the case pass
    #[serde(default, deserialize_with = "null_as_default")]
    pub expected_result: String,
}

impl TestCase {
    /// Create a new test case
    pub fn new(
        title: impl Into<String>,
        precondition: impl Into<String>,
        steps: impl Into<StepList>,
        expected_result: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            precondition: precondition.into(),
            steps: steps.into(),
            expected_result: expected_result.into(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
