//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
///
/// Missing labels and malformed numbers are not errors: they recover to zero
/// or empty values inside the extractors.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Text exceeds maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// Fragment response is not a JSON object
    #[error("Invalid fragment format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A fragment extraction task did not complete
    #[error("Fragment error: {0}")]
    Fragment(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
