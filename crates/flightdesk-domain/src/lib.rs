//! Flightdesk Domain Layer
//!
//! Core value objects and trait interfaces shared by every other crate.
//! Nothing here performs I/O.
//!
//! ## Key Concepts
//!
//! - **IATA code**: 3-letter airport/city identifier, always uppercase
//! - **Dates**: strict ISO-8601 `YYYY-MM-DD` calendar dates and inclusive ranges
//! - **Travel class**: cabin requested from the flight-data provider
//! - **Profile**: the fields (mandatory and optional) one kind of search needs
//! - **Oracle**: the language model that turns free text into structured fields
//!
//! ## Architecture
//!
//! - Pure value types and validation only
//! - Infrastructure implementations (LLM clients, HTTP adapters) live in other crates
//! - Trait definitions for the external collaborators

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod date;
pub mod iata;
pub mod profile;
pub mod travel_class;
pub mod traits;

// Re-exports for convenience
pub use date::{parse_iso_date, DateRange};
pub use iata::IataCode;
pub use profile::{Field, FieldFormat, FieldSpec, Profile};
pub use travel_class::TravelClass;
