use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project config file, created by the operator
pub const CONFIG_FILE: &str = "casegen.yaml";

/// Local overrides, usually git-ignored
pub const LOCAL_CONFIG_FILE: &str = "casegen.local.yaml";

/// Prefix of environment overrides; nested keys are split on `__`
pub const ENV_PREFIX: &str = "CASEGEN_";

/// Configuration error types
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Invalid temperature: {0}. Must be between 0.0 and 2.0")]
    InvalidTemperature(f64),

    #[error("Invalid max_tokens: must be greater than 0")]
    InvalidMaxTokens,

    #[error(
        "Invalid paragraph bounds: min_paragraph_chars ({0}) must be less than max_paragraph_chars ({1})"
    )]
    InvalidParagraphBounds(usize, usize),

    #[error("Invalid max_features: {0}. Must be at least 1")]
    InvalidMaxFeatures(usize),

    #[error("{0}.base_url cannot be empty")]
    EmptyBaseUrl(&'static str),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. casegen.yaml
    /// 3. casegen.local.yaml
    /// 4. Environment variables (`CASEGEN_*`)
    pub fn load() -> Result<Config> {
        Self::load_files(&[PathBuf::from(CONFIG_FILE), PathBuf::from(LOCAL_CONFIG_FILE)])
    }

    /// Load configuration, replacing the default YAML files with `path` when given
    pub fn load_from(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific file, still honoring the environment
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.is_file() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        Self::load_files(&[path.to_path_buf()])
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    /// Figment with defaults, the given YAML files in order, then the environment
    pub fn figment(files: &[PathBuf]) -> Figment {
        let figment = files
            .iter()
            .fold(Figment::from(Serialized::defaults(Config::default())), |fig, file| {
                fig.merge(Yaml::file(file))
            });
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn load_files(files: &[PathBuf]) -> Result<Config> {
        let config: Config = Self::figment(files)
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    ///
    /// A missing API key or model is not an error; it only disables the
    /// remote path.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        if !(0.0..=2.0).contains(&config.llm.temperature) {
            return Err(ConfigError::InvalidTemperature(config.llm.temperature));
        }

        if config.llm.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens);
        }

        if config.llm.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl("llm"));
        }

        if config.document.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl("document"));
        }

        let fallback = &config.fallback;
        if fallback.min_paragraph_chars >= fallback.max_paragraph_chars {
            return Err(ConfigError::InvalidParagraphBounds(
                fallback.min_paragraph_chars,
                fallback.max_paragraph_chars,
            ));
        }

        if fallback.max_features == 0 {
            return Err(ConfigError::InvalidMaxFeatures(fallback.max_features));
        }

        Ok(())
    }
}
