//! casegen CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;

use casegen::application::TestCaseApi;
use casegen::cli::{commands, handle_error, Cli, Commands};
use casegen::infrastructure::config::ConfigLoader;
use casegen::infrastructure::documents::LarkDocumentFetcher;
use casegen::infrastructure::llm::HttpChatClientFactory;
use casegen::infrastructure::logging::{LogConfig, LoggerImpl};
use casegen::infrastructure::prompts::PromptStore;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(err) = run(cli).await {
        handle_error(err, json_mode);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ConfigLoader::load_from(cli.config.as_deref())?;
    let log_config = LogConfig::from_settings(&config.logging)?;
    let _logger = LoggerImpl::init(&log_config)?;

    if let Commands::Config(args) = cli.command {
        return commands::config::execute(args, &config, cli.json);
    }

    let prompts = PromptStore::load(config.prompts.dir.as_deref())
        .context("Failed to load prompt templates")?;
    let api = TestCaseApi::from_config(
        &config,
        &prompts,
        Arc::new(HttpChatClientFactory),
        Arc::new(LarkDocumentFetcher::new(config.document.clone())),
    );

    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, &api, cli.json).await,
        Commands::Evaluate(args) => commands::evaluate::execute(args, &api, cli.json).await,
        Commands::Fetch(args) => commands::fetch::execute(args, &api, cli.json).await,
        Commands::Config(args) => commands::config::execute(args, &config, cli.json),
    }
}
