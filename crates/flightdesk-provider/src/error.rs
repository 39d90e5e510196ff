//! Error types for the flight data provider.

use flightdesk_domain::{Field, Profile};
use serde::Deserialize;
use thiserror::Error;

/// Provider operation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// The API answered with a non-success status
    #[error("API error (HTTP {status}): {detail}")]
    Api {
        /// HTTP status code
        status: u16,
        /// First error detail from the response body
        detail: String,
    },

    /// Credentials rejected or token request failed
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Connection error (network, DNS, timeout, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid client setup
    #[error("Configuration error: {0}")]
    Config(String),

    /// A link in a response points away from the configured API
    #[error("Refusing to follow link outside the API: {0}")]
    ForeignLink(String),

    /// Client not connected (connect() must be called first)
    #[error("Client not connected - call connect() first")]
    NotConnected,

    /// Parameters lack mandatory fields
    #[error("Missing parameters: {}", join_fields(.0))]
    MissingParameters(Vec<Field>),

    /// Parameters were extracted for a different search
    #[error("Parameters are for {actual}, expected {expected}")]
    ProfileMismatch {
        /// Profile the search needs
        expected: Profile,
        /// Profile the parameters carry
        actual: Profile,
    },
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ProviderError::Connection(e.to_string())
        } else if e.is_decode() {
            ProviderError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ProviderError::Api {
                status: status.as_u16(),
                detail: e.to_string(),
            }
        } else {
            ProviderError::Connection(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::Decode(format!("JSON parsing error: {}", e))
    }
}

/// Error body shapes the API uses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
    // OAuth endpoint shape
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    title: Option<String>,
    detail: Option<String>,
}

/// Best human-readable message from an error response body
pub(crate) fn error_detail(body: &str) -> String {
    let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();

    let detail = parsed.and_then(|b| {
        if let Some(entry) = b.errors.into_iter().next() {
            match (entry.title, entry.detail) {
                (Some(title), Some(detail)) => Some(format!("{}: {}", title, detail)),
                (title, detail) => detail.or(title),
            }
        } else {
            b.error_description.or(b.error)
        }
    });

    match detail {
        Some(detail) => detail,
        None if body.trim().is_empty() => "Unknown error".to_string(),
        None => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_from_errors_array() {
        let body = r#"{"errors":[{"status":400,"code":477,"title":"INVALID FORMAT","detail":"departureDate is in the past","source":{"parameter":"departureDate"}}]}"#;
        assert_eq!(
            error_detail(body),
            "INVALID FORMAT: departureDate is in the past"
        );
    }

    #[test]
    fn test_error_detail_from_oauth_error() {
        let body = r#"{"error":"invalid_client","error_description":"Client credentials are invalid","code":38187,"title":"Invalid parameters"}"#;
        assert_eq!(error_detail(body), "Client credentials are invalid");
    }

    #[test]
    fn test_error_detail_falls_back_to_body() {
        assert_eq!(error_detail("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_detail(""), "Unknown error");
    }

    #[test]
    fn test_missing_parameters_display() {
        let err = ProviderError::MissingParameters(vec![Field::Origin, Field::DepartureDate]);
        assert_eq!(err.to_string(), "Missing parameters: origin, departure_date");
    }
}
