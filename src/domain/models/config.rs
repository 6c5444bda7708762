use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::pipeline::PipelineMode;

/// Main configuration structure for casegen
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Remote chat-completion settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Generation pipeline selection
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Rule-based generator thresholds
    #[serde(default)]
    pub fallback: FallbackConfig,

    /// Prompt override location
    #[serde(default)]
    pub prompts: PromptsConfig,

    /// Document platform credentials
    #[serde(default)]
    pub document: DocumentConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Chat-completion service configuration
///
/// A missing key or model does not make the configuration invalid; it only
/// keeps the remote path switched off.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LlmConfig {
    /// Master switch for the remote path
    #[serde(default)]
    pub enabled: bool,

    /// Bearer credential
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier sent with every request
    #[serde(default)]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// Sampling temperature (0.0-2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Output token cap per call
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request the provider's extended reasoning mode
    #[serde(default)]
    pub extended_reasoning: bool,

    /// Transport timeout; unset means no timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_llm_base_url() -> String {
    "https://ark.cn-beijing.volces.com/api/v3".to_string()
}

const fn default_temperature() -> f64 {
    0.2
}

const fn default_max_tokens() -> u32 {
    32000
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            model: None,
            base_url: default_llm_base_url(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            extended_reasoning: false,
            timeout_secs: None,
        }
    }
}

impl LlmConfig {
    /// Why the remote path cannot be used, if it cannot
    pub fn readiness_issue(&self) -> Option<&'static str> {
        if !self.enabled {
            return Some("remote generation is disabled");
        }
        if is_blank(self.api_key.as_deref()) {
            return Some("api key is not configured");
        }
        if is_blank(self.model.as_deref()) {
            return Some("model is not configured");
        }
        None
    }

    /// True when enabled with a non-blank key and model
    pub fn is_ready(&self) -> bool {
        self.readiness_issue().is_none()
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Generation pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GenerationConfig {
    /// Which stage chain produces test cases
    #[serde(default)]
    pub pipeline: PipelineMode,
}

/// Thresholds for the rule-based generator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FallbackConfig {
    /// Feature text must be longer than this many characters
    #[serde(default = "default_min_feature_chars")]
    pub min_feature_chars: usize,

    /// Paragraphs must be longer than this many characters
    #[serde(default = "default_min_paragraph_chars")]
    pub min_paragraph_chars: usize,

    /// Paragraphs must be shorter than this many characters
    #[serde(default = "default_max_paragraph_chars")]
    pub max_paragraph_chars: usize,

    /// Maximum number of features turned into cases
    #[serde(default = "default_max_features")]
    pub max_features: usize,
}

const fn default_min_feature_chars() -> usize {
    5
}

const fn default_min_paragraph_chars() -> usize {
    20
}

const fn default_max_paragraph_chars() -> usize {
    500
}

const fn default_max_features() -> usize {
    10
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            min_feature_chars: default_min_feature_chars(),
            min_paragraph_chars: default_min_paragraph_chars(),
            max_paragraph_chars: default_max_paragraph_chars(),
            max_features: default_max_features(),
        }
    }
}

/// Prompt store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PromptsConfig {
    /// Directory holding `<key>.txt` overrides
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Document platform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DocumentConfig {
    /// Application id used to obtain a tenant token
    #[serde(default)]
    pub app_id: Option<String>,

    /// Application secret used to obtain a tenant token
    #[serde(default)]
    pub app_secret: Option<String>,

    /// Open platform base URL
    #[serde(default = "default_document_base_url")]
    pub base_url: String,
}

fn default_document_base_url() -> String {
    "https://open.feishu.cn".to_string()
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            app_secret: None,
            base_url: default_document_base_url(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
