//! Infrastructure layer module
//!
//! This module contains all infrastructure adapters and external integrations:
//! - Chat-completion client (reqwest)
//! - Lark document fetcher
//! - Configuration management
//! - Logging infrastructure
//! - Prompt store
//! - Response sanitizing and decoding
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod documents;
pub mod llm;
pub mod logging;
pub mod prompts;
pub mod validators;
