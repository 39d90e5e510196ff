//! Configuration for the Extractor

use flightdesk_domain::TravelClass;
use serde::{Deserialize, Serialize};

/// Configuration for the Extractor
///
/// The `default_*` values fill optional fields the query leaves open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum query length (characters)
    pub max_query_length: usize,

    /// Travel class when the query names none
    pub default_travel_class: TravelClass,

    /// Adult travellers when the query names none
    pub default_adults: u32,

    /// Offers to return when the query names no limit
    pub default_max_results: u32,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_query_length == 0 {
            return Err("max_query_length must be greater than 0".to_string());
        }
        if !(1..=9).contains(&self.default_adults) {
            return Err("default_adults must be between 1 and 9".to_string());
        }
        if !(1..=250).contains(&self.default_max_results) {
            return Err("default_max_results must be between 1 and 250".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_query_length: 2_000,
            default_travel_class: TravelClass::Economy,
            default_adults: 1,
            default_max_results: 3,
        }
    }
}
