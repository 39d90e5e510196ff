//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractorError {
    /// LLM provider error (unreachable, timed out, rejected the request)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Query is empty after trimming
    #[error("Query is empty")]
    EmptyQuery,

    /// Query exceeds maximum length
    #[error("Query too long: {0} chars (max: {1})")]
    QueryTooLong(usize, usize),

    /// LLM response is not a single JSON object
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
