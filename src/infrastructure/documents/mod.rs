//! Document platform adapters

pub mod lark;

pub use lark::{clean_url, extract_document_id, LarkDocumentFetcher};
