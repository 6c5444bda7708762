//! Evaluation score domain model

use serde::de::Deserializer;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

/// Lowest valid value of a score dimension
pub const MIN_SCORE: i64 = 0;

/// Highest valid value of a score dimension
pub const MAX_SCORE: i64 = 5;

/// Overall assessment of a test case set against a requirements document
///
/// Every dimension is an integer in `[0, 5]`. `total_score` is derived on
/// read and is only defined when all three dimensions are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationScore {
    /// How much of the requirements the cases cover
    #[serde(default, deserialize_with = "lenient_score")]
    pub coverage: Option<i64>,

    /// Correctness, executability and precision of the cases
    #[serde(default, deserialize_with = "lenient_score")]
    pub quality: Option<i64>,

    /// Absence of redundant or off-topic cases
    #[serde(default, alias = "non_redundancy", deserialize_with = "lenient_score")]
    pub non_redundancy: Option<i64>,
}

impl EvaluationScore {
    /// Create a fully populated score
    pub const fn new(coverage: i64, quality: i64, non_redundancy: i64) -> Self {
        Self {
            coverage: Some(coverage),
            quality: Some(quality),
            non_redundancy: Some(non_redundancy),
        }
    }

    /// The all-zero score returned whenever no usable evaluation exists
    pub const fn zero() -> Self {
        Self::new(0, 0, 0)
    }

    /// Arithmetic mean of the three dimensions, `None` if any is missing
    #[allow(clippy::cast_precision_loss)]
    pub fn total_score(&self) -> Option<f64> {
        let (Some(c), Some(q), Some(n)) = (self.coverage, self.quality, self.non_redundancy)
        else {
            return None;
        };
        Some((c + q + n) as f64 / 3.0)
    }

    /// Reset every missing or out-of-range dimension to 0
    #[must_use]
    pub fn normalized(self) -> Self {
        let fix = |value: Option<i64>| match value {
            Some(v) if (MIN_SCORE..=MAX_SCORE).contains(&v) => Some(v),
            _ => Some(0),
        };
        Self {
            coverage: fix(self.coverage),
            quality: fix(self.quality),
            non_redundancy: fix(self.non_redundancy),
        }
    }
}

impl Serialize for EvaluationScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("EvaluationScore", 4)?;
        state.serialize_field("coverage", &self.coverage)?;
        state.serialize_field("quality", &self.quality)?;
        state.serialize_field("nonRedundancy", &self.non_redundancy)?;
        state.serialize_field("totalScore", &self.total_score())?;
        state.end()
    }
}

/// Accepts integers, floats and numeric strings; anything else is `None`
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(float_score)),
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(float_score))
        }
        _ => None,
    })
}

/// Fractions inside `[0, 5]` truncate; fractions outside stay outside so that
/// `normalized` resets them
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn float_score(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let rounded = if value < MIN_SCORE as f64 {
        value.floor()
    } else if value > MAX_SCORE as f64 {
        value.ceil()
    } else {
        value.trunc()
    };
    Some(rounded as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_total_score_is_mean() {
        let score = EvaluationScore::new(3, 4, 5);
        assert_eq!(score.total_score(), Some(4.0));
    }

    #[test]
    fn test_total_score_exact_for_all_valid_combinations() {
        for c in MIN_SCORE..=MAX_SCORE {
            for q in MIN_SCORE..=MAX_SCORE {
                for n in MIN_SCORE..=MAX_SCORE {
                    let total = EvaluationScore::new(c, q, n).total_score().unwrap();
                    #[allow(clippy::cast_precision_loss)]
                    let expected = (c + q + n) as f64 / 3.0;
                    assert!((total - expected).abs() < f64::EPSILON);
                }
            }
        }
    }

    #[test]
    fn test_total_score_undefined_when_any_missing() {
        let mut score = EvaluationScore::new(1, 2, 3);
        score.quality = None;
        assert_eq!(score.total_score(), None);

        let value = serde_json::to_value(score).unwrap();
        assert!(value["totalScore"].is_null());
    }

    #[test]
    fn test_serializes_camel_case_with_total() {
        let value = serde_json::to_value(EvaluationScore::new(5, 5, 2)).unwrap();
        assert_eq!(value["nonRedundancy"], json!(2));
        assert_eq!(value["totalScore"], json!(4.0));
    }

    #[test]
    fn test_normalized_resets_out_of_range_and_missing() {
        let score: EvaluationScore =
            serde_json::from_value(json!({"coverage": 7, "quality": -1})).unwrap();
        let fixed = score.normalized();
        assert_eq!(fixed, EvaluationScore::zero());

        let valid = EvaluationScore::new(0, 5, 3).normalized();
        assert_eq!(valid, EvaluationScore::new(0, 5, 3));
    }

    #[test]
    fn test_fractional_scores_outside_range_reset() {
        let score: EvaluationScore = serde_json::from_value(json!({
            "coverage": -0.7,
            "quality": 5.9,
            "nonRedundancy": "5.0"
        }))
        .unwrap();
        assert_eq!(score.coverage, Some(-1));
        assert_eq!(score.quality, Some(6));
        assert_eq!(score.normalized(), EvaluationScore::new(0, 0, 5));
    }

    #[test]
    fn test_lenient_decoding() {
        let score: EvaluationScore = serde_json::from_value(json!({
            "coverage": 4.8,
            "quality": "3",
            "non_redundancy": "high",
            "totalScore": 99,
            "comment": "ignored"
        }))
        .unwrap();
        assert_eq!(score.coverage, Some(4));
        assert_eq!(score.quality, Some(3));
        assert_eq!(score.non_redundancy, None);
    }
}
