//! Output cleanup and decoding for chat-completion responses

pub mod decoder;
pub mod sanitizer;

pub use decoder::ResponseDecoder;
pub use sanitizer::{sanitize, ResponseSanitizer};
