//! Instruction templates for every model call

pub mod store;

pub use store::{PromptKey, PromptStore, PromptStoreError};
