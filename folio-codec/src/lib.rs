//! Export/import codec for folio configuration documents.
//!
//! [`encode`] turns a [`folio_model::Configuration`] into the pretty-printed
//! JSON document users download; [`decode`] validates a document and turns
//! it back into a configuration ready to be reloaded. Decoding never touches
//! a session, so a broken document cannot be half-applied.

mod document;

pub use document::{FORMAT_VERSION, decode, encode, export_filename};

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding a document.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text is not well-formed JSON.
    #[error("parse error: {0}")]
    Parse(serde_json::Error),

    /// The JSON is missing required keys or has malformed entries.
    #[error("invalid configuration format: {0}")]
    InvalidFormat(String),

    #[error("serialization error: {0}")]
    Serialize(serde_json::Error),
}
