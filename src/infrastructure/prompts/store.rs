//! Prompt store
//!
//! Built-in prompts are compiled into the binary. A configured directory may
//! override any of them with `<key>.txt`.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::models::{Pipeline, PipelineMode, StageSpec};

/// User template of the single-call pipeline
pub const SINGLE_CALL_USER_TEMPLATE: &str = "PRD content:\n{input}";

/// Identifies one instruction template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKey {
    Decomposition,
    CoveragePlanning,
    CaseSynthesis,
    SingleCall,
    Evaluation,
}

impl PromptKey {
    /// Every key, in a stable order
    pub const ALL: [Self; 5] = [
        Self::Decomposition,
        Self::CoveragePlanning,
        Self::CaseSynthesis,
        Self::SingleCall,
        Self::Evaluation,
    ];

    /// Key name, also the override file stem
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Decomposition => "decomposition",
            Self::CoveragePlanning => "coverage_planning",
            Self::CaseSynthesis => "case_synthesis",
            Self::SingleCall => "single_call",
            Self::Evaluation => "evaluation",
        }
    }

    const fn builtin(self) -> &'static str {
        match self {
            Self::Decomposition => include_str!("../../../prompts/decomposition.txt"),
            Self::CoveragePlanning => include_str!("../../../prompts/coverage_planning.txt"),
            Self::CaseSynthesis => include_str!("../../../prompts/case_synthesis.txt"),
            Self::SingleCall => include_str!("../../../prompts/single_call.txt"),
            Self::Evaluation => include_str!("../../../prompts/evaluation.txt"),
        }
    }
}

impl fmt::Display for PromptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while loading prompt overrides
#[derive(Debug, Error)]
pub enum PromptStoreError {
    #[error("Prompt directory does not exist: {0}")]
    MissingDirectory(PathBuf),

    #[error("Failed to read prompt override {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Prompt override {0} is empty")]
    Empty(PathBuf),
}

/// Read-only lookup of instruction templates
#[derive(Debug, Clone)]
pub struct PromptStore {
    prompts: HashMap<PromptKey, String>,
}

impl PromptStore {
    /// Store holding only the compiled-in prompts
    pub fn builtin() -> Self {
        let prompts = PromptKey::ALL
            .iter()
            .map(|key| (*key, key.builtin().trim().to_string()))
            .collect();
        Self { prompts }
    }

    /// Built-in prompts, overridden by files in `dir` when given
    pub fn load(dir: Option<&Path>) -> Result<Self, PromptStoreError> {
        let mut store = Self::builtin();
        let Some(dir) = dir else {
            return Ok(store);
        };

        if !dir.is_dir() {
            return Err(PromptStoreError::MissingDirectory(dir.to_path_buf()));
        }

        for key in PromptKey::ALL {
            let path = dir.join(format!("{}.txt", key.as_str()));
            if !path.exists() {
                continue;
            }
            let content = std::fs::read_to_string(&path).map_err(|source| {
                PromptStoreError::Unreadable {
                    path: path.clone(),
                    source,
                }
            })?;
            let content = content.trim();
            if content.is_empty() {
                return Err(PromptStoreError::Empty(path));
            }
            debug!(prompt = %key, path = %path.display(), "Loaded prompt override");
            store.prompts.insert(key, content.to_string());
        }

        info!(dir = %dir.display(), "Prompt store loaded with overrides");
        Ok(store)
    }

    /// Template for `key`
    pub fn get(&self, key: PromptKey) -> &str {
        self.prompts
            .get(&key)
            .map_or_else(|| key.builtin().trim(), String::as_str)
    }

    /// Stage chain producing test cases in the given mode
    pub fn generation_pipeline(&self, mode: PipelineMode) -> Pipeline {
        match mode {
            PipelineMode::ThreeStage => Pipeline::new(
                "three_stage",
                vec![
                    StageSpec::new("decomposition", self.get(PromptKey::Decomposition)),
                    StageSpec::new("coverage_planning", self.get(PromptKey::CoveragePlanning)),
                    StageSpec::new("case_synthesis", self.get(PromptKey::CaseSynthesis)),
                ],
            ),
            PipelineMode::SingleCall => Pipeline::new(
                "single_call",
                vec![StageSpec::new("single_call", self.get(PromptKey::SingleCall))
                    .with_user_template(SINGLE_CALL_USER_TEMPLATE)],
            ),
        }
    }

    /// One-stage chain scoring a case set; the input is the full user message
    pub fn evaluation_pipeline(&self) -> Pipeline {
        Pipeline::new(
            "evaluation",
            vec![StageSpec::new("evaluation", self.get(PromptKey::Evaluation))],
        )
    }
}

impl Default for PromptStore {
    fn default() -> Self {
        Self::builtin()
    }
}
