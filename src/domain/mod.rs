//! Domain layer for casegen
//!
//! Core models, pipeline errors and the port traits that infrastructure
//! adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{PipelineError, PipelineResult};
