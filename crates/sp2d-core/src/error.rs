//! Error types for the sp2d-core library.
//!
//! Extraction itself never fails: a frame that does not yield both fields
//! produces [`crate::ExtractionResult::Empty`]. These errors only come from
//! building an extractor out of configuration and from loading that
//! configuration.

use thiserror::Error;

/// Main error type for the sp2d library.
#[derive(Error, Debug)]
pub enum Sp2dError {
    /// Extractor construction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while building an extractor from configuration.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A configured keyword produced an invalid regular expression.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A configured keyword is empty or whitespace only.
    #[error("empty keyword in {field}")]
    EmptyKeyword { field: String },

    /// No anchor phrase was configured.
    #[error("at least one anchor phrase is required")]
    NoAnchors,
}

/// Result type for the sp2d library.
pub type Result<T> = std::result::Result<T, Sp2dError>;
