//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

/// Trait for the language model oracle
///
/// Implemented by the infrastructure layer (flightdesk-llm). Calls are
/// blocking and are never retried by callers.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate a completion constrained to a JSON object (if supported)
    ///
    /// `schema` is an informal sketch of the expected object. Providers
    /// without a structured mode fall back to plain generation.
    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error>;
}
