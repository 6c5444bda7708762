//! Command-line interface
//!
//! Clap definitions, output formatting, and one module per subcommand.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{ConfigArgs, EvaluateArgs, FetchArgs, GenerateArgs};

#[derive(Parser, Debug)]
#[command(name = "casegen")]
#[command(about = "casegen - turn requirements documents into test cases", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file replacing casegen.yaml and casegen.local.yaml
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate test cases from a requirements document
    Generate(GenerateArgs),
    /// Score a set of test cases against a requirements document
    Evaluate(EvaluateArgs),
    /// Fetch the plain text of a hosted document
    Fetch(FetchArgs),
    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Print a fatal error and exit with status 1
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "message": format!("{err:#}"),
        });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
