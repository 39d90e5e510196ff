//! Error types for the CLI application.

use flightdesk_domain::Field;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error (missing credentials, bad config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// LLM setup error
    #[error("LLM error: {0}")]
    Llm(#[from] flightdesk_llm::LlmError),

    /// Extraction produced no usable record
    #[error("Could not extract parameters: {0}")]
    Extraction(String),

    /// Extraction succeeded but mandatory fields are missing
    #[error("Missing mandatory fields: {}", join_fields(.0))]
    Incomplete(Vec<Field>),

    /// Flight data provider error
    #[error("Provider error: {0}")]
    Provider(#[from] flightdesk_provider::ProviderError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<flightdesk_extractor::ExtractionFailure> for CliError {
    fn from(failure: flightdesk_extractor::ExtractionFailure) -> Self {
        CliError::Extraction(failure.reason())
    }
}
