//! `casegen config`

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::logging::SecretScrubber;

#[derive(Args, Debug)]
pub struct ConfigArgs {}

#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub llm_ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_issue: Option<String>,
    pub config: Config,
}

impl ConfigOutput {
    /// Snapshot of `config` with every secret masked
    pub fn redacted(config: &Config) -> Self {
        let mut shown = config.clone();
        shown.llm.api_key = SecretScrubber::mask(config.llm.api_key.as_deref());
        shown.document.app_secret = SecretScrubber::mask(config.document.app_secret.as_deref());
        Self {
            llm_ready: config.llm.is_ready(),
            llm_issue: config.llm.readiness_issue().map(str::to_string),
            config: shown,
        }
    }
}

impl CommandOutput for ConfigOutput {
    fn to_human(&self) -> String {
        let status = match &self.llm_issue {
            None => "LLM path: ready".to_string(),
            Some(issue) => format!("LLM path: not ready ({issue}), rule-based generation only"),
        };
        let body = serde_yaml::to_string(&self.config).unwrap_or_default();
        format!("{status}\n\n{}", body.trim_end())
    }
}

pub fn execute(_args: ConfigArgs, config: &Config, json_mode: bool) -> Result<()> {
    output(&ConfigOutput::redacted(config), json_mode);
    Ok(())
}
