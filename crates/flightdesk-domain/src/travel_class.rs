//! Travel class module - cabin requested from the provider

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cabin class for a flight offer search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelClass {
    /// Standard cabin (the default)
    Economy,

    /// Economy with extra legroom and service
    PremiumEconomy,

    /// Business cabin
    Business,

    /// First cabin
    First,
}

impl TravelClass {
    /// Get the provider wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelClass::Economy => "ECONOMY",
            TravelClass::PremiumEconomy => "PREMIUM_ECONOMY",
            TravelClass::Business => "BUSINESS",
            TravelClass::First => "FIRST",
        }
    }

    /// Parse a travel class, case-insensitive
    ///
    /// Spaces and hyphens are read as underscores so that
    /// "premium economy" and "Premium-Economy" both match.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "ECONOMY" => Some(TravelClass::Economy),
            "PREMIUM_ECONOMY" => Some(TravelClass::PremiumEconomy),
            "BUSINESS" => Some(TravelClass::Business),
            "FIRST" => Some(TravelClass::First),
            _ => None,
        }
    }
}

impl Default for TravelClass {
    fn default() -> Self {
        TravelClass::Economy
    }
}

impl fmt::Display for TravelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TravelClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid travel class: {}", s))
    }
}
