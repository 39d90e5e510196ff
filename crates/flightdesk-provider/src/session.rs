//! OAuth session management for the provider API.

use crate::error::{error_detail, ProviderError};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tracing::debug;

/// Refresh this long before the token actually expires
const EXPIRY_MARGIN_SECS: i64 = 30;

/// Token response from the OAuth endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Bearer token
    pub access_token: String,
    /// Token type (always `Bearer`)
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds
    pub expires_in: i64,
}

/// Bearer token and the instant it stops being valid
#[derive(Debug, Clone)]
pub struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Build a token that expires `expires_in` seconds after `issued_at`
    pub fn new(value: String, expires_in: i64, issued_at: DateTime<Utc>) -> Self {
        Self {
            value,
            expires_at: issued_at + Duration::seconds(expires_in),
        }
    }

    /// The bearer value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the token needs refreshing at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) >= self.expires_at
    }
}

/// Request a token with the client-credentials grant
pub fn establish_session(
    http_client: &reqwest::blocking::Client,
    base_url: &str,
    api_key: &str,
    api_secret: &str,
) -> Result<AccessToken, ProviderError> {
    let url = format!("{}/v1/security/oauth2/token", base_url);

    let response = http_client
        .post(&url)
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", api_key),
            ("client_secret", api_secret),
        ])
        .send()?;

    let status = response.status();
    let body = response.text()?;

    if !status.is_success() {
        return Err(ProviderError::Auth(format!(
            "HTTP {}: {}",
            status.as_u16(),
            error_detail(&body)
        )));
    }

    let token: TokenResponse = serde_json::from_str(&body)?;
    if token.access_token.is_empty() {
        return Err(ProviderError::Auth("Empty access token".to_string()));
    }

    debug!("Obtained access token valid for {}s", token.expires_in);

    Ok(AccessToken::new(token.access_token, token.expires_in, Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_parsing() {
        let json = r#"{
            "type": "amadeusOAuth2Token",
            "username": "dev@example.com",
            "application_name": "flightdesk",
            "client_id": "abc",
            "token_type": "Bearer",
            "access_token": "AnHZ3TEe1kNzIpTfXbfGfLGsE9ah",
            "expires_in": 1799,
            "state": "approved",
            "scope": ""
        }"#;

        let response: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "AnHZ3TEe1kNzIpTfXbfGfLGsE9ah");
        assert_eq!(response.expires_in, 1799);
        assert_eq!(response.token_type.as_deref(), Some("Bearer"));
    }

    #[test]
    fn test_token_expiry() {
        let issued = Utc::now();
        let token = AccessToken::new("t".to_string(), 1799, issued);

        assert!(!token.is_expired(issued));
        assert!(!token.is_expired(issued + Duration::seconds(1700)));
        assert!(token.is_expired(issued + Duration::seconds(1780)));
        assert!(token.is_expired(issued + Duration::seconds(4000)));
    }
}
