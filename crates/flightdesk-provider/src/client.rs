//! Amadeus self-service API client.

use crate::error::{error_detail, ProviderError};
use crate::params::{AvailabilityParams, DestinationParams, OfferSearchParams};
use crate::provider::FlightDataProvider;
use crate::records::{
    parse_availability, parse_destinations, parse_offers, parse_performance, AvailabilityRecord,
    DestinationRecord, Offer, PerformanceRecord,
};
use crate::session::{establish_session, AccessToken};
use chrono::{NaiveDate, Utc};
use flightdesk_domain::IataCode;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default API base URL (test environment)
pub const DEFAULT_BASE_URL: &str = "https://test.api.amadeus.com";

/// Configuration for the provider client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API base URL, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Grouping for destination search results (`DATE`, `DESTINATION`, `DURATION`, `WEEK`, `COUNTRY`)
    #[serde(default = "default_view_by")]
    pub view_by: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_view_by() -> String {
    "WEEK".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            view_by: default_view_by(),
        }
    }
}

/// Amadeus API client
///
/// Lifecycle: [`new`](Self::new), [`connect`](Self::connect), any number of
/// searches, then [`disconnect`](Self::disconnect). The access token is
/// refreshed transparently once it expires.
pub struct AmadeusClient {
    api_key: String,
    api_secret: String,
    config: ProviderConfig,
    http_client: Client,
    token: Option<AccessToken>,
}

impl AmadeusClient {
    /// Create a new client; no network traffic happens until `connect`
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        config: ProviderConfig,
    ) -> Result<Self, ProviderError> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.trim().is_empty() || api_secret.trim().is_empty() {
            return Err(ProviderError::Config(
                "API key and secret must not be empty".to_string(),
            ));
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            api_secret,
            config: ProviderConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
            http_client,
            token: None,
        })
    }

    /// Obtain an access token
    pub fn connect(&mut self) -> Result<(), ProviderError> {
        info!("Connecting to {}", self.config.base_url);

        let token = establish_session(
            &self.http_client,
            &self.config.base_url,
            &self.api_key,
            &self.api_secret,
        )?;
        self.token = Some(token);

        Ok(())
    }

    /// Drop the access token; later calls fail until `connect` again
    pub fn disconnect(&mut self) {
        self.token = None;
    }

    /// Whether `connect` has succeeded and `disconnect` has not been called
    pub fn is_connected(&self) -> bool {
        self.token.is_some()
    }

    /// The active configuration
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn bearer(&mut self) -> Result<String, ProviderError> {
        let expired = match &self.token {
            None => return Err(ProviderError::NotConnected),
            Some(token) => token.is_expired(Utc::now()),
        };

        if expired {
            debug!("Access token expired, refreshing");
            self.connect()?;
        }

        self.token
            .as_ref()
            .map(|t| t.value().to_string())
            .ok_or(ProviderError::NotConnected)
    }

    /// Authorize, send, and return the body of a successful response
    fn send(&mut self, request: RequestBuilder) -> Result<String, ProviderError> {
        let token = self.bearer()?;
        let response = request.bearer_auth(token).send()?;

        let status = response.status();
        let body = response.text()?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(ProviderError::Auth(error_detail(&body)));
        }
        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        debug!("Response: HTTP {} ({} bytes)", status.as_u16(), body.len());
        Ok(body)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Links must share scheme, host and port with the base URL; the
    /// bearer token is only ever sent there.
    fn check_link(&self, url: &str) -> Result<(), ProviderError> {
        let base = Url::parse(&self.config.base_url)
            .map_err(|e| ProviderError::Config(format!("Invalid base URL: {}", e)))?;
        let link = Url::parse(url).map_err(|_| ProviderError::ForeignLink(url.to_string()))?;

        if link.origin() != base.origin() {
            warn!("Ignoring link to {}", url);
            return Err(ProviderError::ForeignLink(url.to_string()));
        }
        Ok(())
    }
}

impl FlightDataProvider for AmadeusClient {
    fn search_offers(&mut self, params: &OfferSearchParams) -> Result<Vec<Offer>, ProviderError> {
        info!(
            "Searching offers {} -> {} on {}",
            params.origin, params.destination, params.departure_date
        );

        let request = self
            .http_client
            .get(self.url("/v2/shopping/flight-offers"))
            .query(&params.query_pairs());
        let body = self.send(request)?;

        parse_offers(&body)
    }

    fn search_availability(
        &mut self,
        params: &AvailabilityParams,
    ) -> Result<Vec<AvailabilityRecord>, ProviderError> {
        info!(
            "Searching availability {} -> {} on {}",
            params.origin, params.destination, params.departure_date
        );

        let request = self
            .http_client
            .post(self.url("/v1/shopping/availability/flight-availabilities"))
            .json(&params.request_body());
        let body = self.send(request)?;

        parse_availability(&body)
    }

    fn search_destinations(
        &mut self,
        params: &DestinationParams,
    ) -> Result<Vec<DestinationRecord>, ProviderError> {
        info!(
            "Searching destinations from {} for {}",
            params.origin, params.departure_date_range
        );

        let request = self
            .http_client
            .get(self.url("/v1/shopping/flight-destinations"))
            .query(&params.query_pairs(&self.config.view_by));
        let body = self.send(request)?;

        parse_destinations(&body)
    }

    fn on_time_performance(
        &mut self,
        airport_code: &IataCode,
        date: NaiveDate,
    ) -> Result<PerformanceRecord, ProviderError> {
        info!("Fetching on-time prediction for {} on {}", airport_code, date);

        let request = self
            .http_client
            .get(self.url("/v1/airport/predictions/on-time"))
            .query(&[
                ("airportCode", airport_code.to_string()),
                ("date", date.format("%Y-%m-%d").to_string()),
            ]);
        let body = self.send(request)?;

        parse_performance(&body, airport_code.as_str(), date)
    }

    fn fetch_link(&mut self, url: &str) -> Result<Value, ProviderError> {
        debug!("Fetching link {}", url);
        self.check_link(url)?;

        let request = self.http_client.get(url);
        let body = self.send(request)?;

        Ok(serde_json::from_str(&body)?)
    }
}
