//! `casegen evaluate`

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use super::read_prd;
use crate::application::{EvaluationRequest, EvaluationResponse, TestCaseApi};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::TestCase;

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// JSON file holding an array of test cases
    #[arg(long, value_name = "PATH")]
    pub cases_file: PathBuf,

    /// Requirements text
    #[arg(long, conflicts_with = "prd_file", required_unless_present = "prd_file")]
    pub prd: Option<String>,

    /// File holding the requirements text
    #[arg(long, value_name = "PATH")]
    pub prd_file: Option<PathBuf>,
}

impl CommandOutput for EvaluationResponse {
    fn to_human(&self) -> String {
        let Some(score) = self.score.filter(|_| self.success) else {
            return format!("Evaluation failed: {}", self.message);
        };

        let dim = |value: Option<i64>| value.map_or_else(|| "-".to_string(), |v| format!("{v}/5"));
        [
            self.message.clone(),
            format!("  Coverage:       {}", dim(score.coverage)),
            format!("  Quality:        {}", dim(score.quality)),
            format!("  Non-redundancy: {}", dim(score.non_redundancy)),
            format!(
                "  Total:          {}",
                score
                    .total_score()
                    .map_or_else(|| "-".to_string(), |t| format!("{t:.2}"))
            ),
        ]
        .join("\n")
    }
}

/// Read a JSON array of test cases
pub fn read_cases(path: &Path) -> Result<Vec<TestCase>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read test cases from {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of test cases", path.display()))
}

pub async fn execute(args: EvaluateArgs, api: &TestCaseApi, json_mode: bool) -> Result<()> {
    let test_cases = read_cases(&args.cases_file)?;
    let prd = read_prd(args.prd.as_deref(), args.prd_file.as_deref(), false)?;
    let response = api.evaluate(EvaluationRequest { prd, test_cases }).await;
    output(&response, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::EvaluationScore;
    use std::io::Write;

    #[test]
    fn test_read_cases() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"title": "Login", "steps": "open page", "expectedResult": "shown"}}]"#
        )
        .unwrap();

        let cases = read_cases(file.path()).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].expected_result, "shown");
    }

    #[test]
    fn test_read_cases_rejects_objects() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"title": "Login"}}"#).unwrap();
        let err = read_cases(file.path()).unwrap_err();
        assert!(err.to_string().contains("is not a JSON array of test cases"));
    }

    #[test]
    fn test_human_score() {
        let text = EvaluationResponse::success(EvaluationScore::new(4, 5, 3)).to_human();
        assert!(text.contains("Coverage:       4/5"));
        assert!(text.contains("Total:          4.00"));
    }
}
