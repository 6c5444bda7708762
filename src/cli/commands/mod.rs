//! CLI command implementations.

pub mod config;
pub mod evaluate;
pub mod fetch;
pub mod generate;

pub use config::ConfigArgs;
pub use evaluate::EvaluateArgs;
pub use fetch::FetchArgs;
pub use generate::GenerateArgs;

use anyhow::{bail, Context, Result};
use std::io::{IsTerminal, Read};
use std::path::Path;

/// Resolve the requirements text from an inline value, a file, or piped stdin
pub(crate) fn read_prd(
    inline: Option<&str>,
    file: Option<&Path>,
    allow_stdin: bool,
) -> Result<String> {
    if let Some(text) = inline {
        return Ok(text.to_string());
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read PRD file {}", path.display()));
    }
    if allow_stdin && !std::io::stdin().is_terminal() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read PRD from stdin")?;
        return Ok(text);
    }
    bail!("No PRD given: pass --prd, --prd-file, or pipe the document on stdin")
}
