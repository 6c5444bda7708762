//! `casegen generate`

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::read_prd;
use crate::application::{GenerateRequest, GenerateResponse, TestCaseApi};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::TestCase;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Requirements text
    #[arg(long, conflicts_with = "prd_file")]
    pub prd: Option<String>,

    /// File holding the requirements text (stdin is read when neither is given)
    #[arg(long, value_name = "PATH")]
    pub prd_file: Option<PathBuf>,
}

impl CommandOutput for GenerateResponse {
    fn to_human(&self) -> String {
        let Some(cases) = self.test_cases.as_deref().filter(|_| self.success) else {
            return format!("Generation failed: {}", self.message);
        };

        let mut lines = vec![match &self.source {
            Some(source) => format!("{} (source: {source})", self.message),
            None => self.message.clone(),
        }];
        lines.push(format!("{} test case(s):", cases.len()));
        for (idx, case) in cases.iter().enumerate() {
            lines.push(String::new());
            lines.extend(render_case(idx + 1, case));
        }
        lines.join("\n")
    }
}

fn render_case(number: usize, case: &TestCase) -> Vec<String> {
    let mut lines = vec![format!("[{number}] {}", case.title)];
    if !case.precondition.is_empty() {
        lines.push(format!("    Precondition: {}", case.precondition));
    }
    lines.push("    Steps:".to_string());
    for (step_no, step) in case.steps.iter().enumerate() {
        lines.push(format!("      {}. {step}", step_no + 1));
    }
    if !case.expected_result.is_empty() {
        lines.push(format!("    Expected: {}", case.expected_result));
    }
    lines
}

pub async fn execute(args: GenerateArgs, api: &TestCaseApi, json_mode: bool) -> Result<()> {
    let prd = read_prd(args.prd.as_deref(), args.prd_file.as_deref(), true)?;
    let response = api.generate(GenerateRequest { prd }).await;
    output(&response, json_mode);
    Ok(())
}
