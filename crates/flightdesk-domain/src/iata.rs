//! IATA location codes

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 3-letter IATA airport or city code
///
/// Always exactly three ASCII uppercase letters (`CDG`, `NRT`, `JFK`).
/// Construction is the only place the format is checked, so holding an
/// `IataCode` means the value is well-formed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IataCode(String);

impl IataCode {
    /// Parse a code, rejecting anything but exactly 3 uppercase letters
    ///
    /// # Examples
    ///
    /// ```
    /// use flightdesk_domain::IataCode;
    ///
    /// assert!(IataCode::parse("CDG").is_ok());
    /// assert!(IataCode::parse("cdg").is_err());
    /// assert!(IataCode::parse("CDGX").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<Self, String> {
        if value.len() != 3 || !value.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(format!(
                "Invalid IATA code '{}': expected exactly 3 uppercase letters",
                value
            ));
        }
        Ok(Self(value.to_string()))
    }

    /// Trim and uppercase the input, then apply the strict rule
    ///
    /// Used for model output and user input, where `"cdg "` means `CDG`.
    pub fn normalize(value: &str) -> Result<Self, String> {
        Self::parse(&value.trim().to_ascii_uppercase())
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IataCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for IataCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for IataCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<IataCode> for String {
    fn from(code: IataCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_valid_codes() {
        assert_eq!(IataCode::parse("CDG").unwrap().as_str(), "CDG");
        assert_eq!(IataCode::parse("NRT").unwrap().to_string(), "NRT");
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(IataCode::parse("").is_err());
        assert!(IataCode::parse("CD").is_err());
        assert!(IataCode::parse("CDGX").is_err());
    }

    #[test]
    fn test_rejects_lowercase_and_digits() {
        assert!(IataCode::parse("cdg").is_err());
        assert!(IataCode::parse("CdG").is_err());
        assert!(IataCode::parse("C1G").is_err());
        assert!(IataCode::parse("C G").is_err());
    }

    #[test]
    fn test_rejects_non_ascii_letters() {
        // Three chars but more than three bytes
        assert!(IataCode::parse("ÄÖÜ").is_err());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(IataCode::normalize(" cdg ").unwrap().as_str(), "CDG");
        assert_eq!(IataCode::normalize("Nrt").unwrap().as_str(), "NRT");
        assert!(IataCode::normalize("Paris").is_err());
        assert!(IataCode::normalize("Unknown").is_err());
    }

    #[test]
    fn test_serde_rejects_invalid() {
        let ok: IataCode = serde_json::from_str("\"JFK\"").unwrap();
        assert_eq!(ok.as_str(), "JFK");
        assert!(serde_json::from_str::<IataCode>("\"jfk\"").is_err());
    }

    proptest! {
        #[test]
        fn prop_three_uppercase_letters_accepted(code in "[A-Z]{3}") {
            prop_assert!(IataCode::parse(&code).is_ok());
        }

        #[test]
        fn prop_anything_else_rejected(code in "\\PC{0,6}") {
            let valid = code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase());
            prop_assert_eq!(IataCode::parse(&code).is_ok(), valid);
        }
    }
}
