//! Flightdesk Extractor
//!
//! Converts a free-text travel query into validated search parameters
//! using an LLM.
//!
//! # Architecture
//!
//! ```text
//! Query → PromptBuilder → LLM → strict JSON parse → field validation → defaults
//! ```
//!
//! The reply is only ever parsed as a JSON object. Fields that fail their
//! format check are dropped, so a malformed mandatory field shows up as
//! missing rather than being passed downstream.
//!
//! # Example Usage
//!
//! ```
//! use flightdesk_domain::{Field, Profile};
//! use flightdesk_extractor::{ExtractionRequest, ExtractorConfig, QueryExtractor};
//! use flightdesk_llm::MockProvider;
//!
//! let llm = MockProvider::new(
//!     r#"{"origin": "CDG", "destination": "NRT", "departure_date": "2025-03-14"}"#,
//! );
//! let extractor = QueryExtractor::new(llm, ExtractorConfig::default()).unwrap();
//!
//! let request = ExtractionRequest::new(
//!     "flights from Paris to Tokyo next Friday",
//!     Profile::OfferSearch,
//! );
//!
//! match extractor.extract(&request) {
//!     Ok(params) if params.is_complete() => {
//!         assert_eq!(params.int(Field::Adults), Some(1));
//!     }
//!     Ok(params) => println!("Still need: {:?}", params.missing()),
//!     Err(failure) => println!("Could not extract: {}", failure.reason()),
//! }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod types;
mod validate;

#[cfg(test)]
mod tests;

pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::QueryExtractor;
pub use parser::parse_llm_response;
pub use prompt::{schema_sketch, PromptBuilder};
pub use types::{
    Completeness, ExtractedParameters, ExtractionFailure, ExtractionRequest, FieldIssue,
    FieldValue,
};
pub use validate::{validate_field, validate_record};
