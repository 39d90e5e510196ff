//! In-memory provider for tests.

use crate::error::ProviderError;
use crate::params::{AvailabilityParams, DestinationParams, OfferSearchParams};
use crate::provider::FlightDataProvider;
use crate::records::{AvailabilityRecord, DestinationRecord, Offer, PerformanceRecord};
use chrono::NaiveDate;
use flightdesk_domain::IataCode;
use serde_json::{json, Value};

/// A call the mock received
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderCall {
    /// `search_offers`
    Offers(OfferSearchParams),
    /// `search_availability`
    Availability(AvailabilityParams),
    /// `search_destinations`
    Destinations(DestinationParams),
    /// `on_time_performance`
    OnTime(IataCode, NaiveDate),
    /// `fetch_link`
    Link(String),
}

/// Mock flight data provider with canned records
///
/// # Examples
///
/// ```
/// use flightdesk_domain::IataCode;
/// use flightdesk_provider::{FlightDataProvider, MockFlightProvider};
///
/// let mut provider = MockFlightProvider::new().with_performance(0.73, 0.928);
/// let code = IataCode::parse("JFK").unwrap();
/// let date = chrono::NaiveDate::from_ymd_opt(2024, 12, 21).unwrap();
///
/// let record = provider.on_time_performance(&code, date).unwrap();
/// assert_eq!(record.result, Some(0.73));
/// assert_eq!(provider.calls().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockFlightProvider {
    offers: Vec<Offer>,
    availability: Vec<AvailabilityRecord>,
    destinations: Vec<DestinationRecord>,
    performance: Option<(Option<f64>, Option<f64>)>,
    link_response: Option<Value>,
    error: Option<ProviderError>,
    calls: Vec<ProviderCall>,
}

impl MockFlightProvider {
    /// Empty mock; every search returns no records
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that fails every call with `error`
    pub fn failing(error: ProviderError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Records returned by `search_offers`
    pub fn with_offers(mut self, offers: Vec<Offer>) -> Self {
        self.offers = offers;
        self
    }

    /// Records returned by `search_availability`
    pub fn with_availability(mut self, records: Vec<AvailabilityRecord>) -> Self {
        self.availability = records;
        self
    }

    /// Records returned by `search_destinations`
    pub fn with_destinations(mut self, records: Vec<DestinationRecord>) -> Self {
        self.destinations = records;
        self
    }

    /// Fractions returned by `on_time_performance`
    pub fn with_performance(mut self, result: f64, probability: f64) -> Self {
        self.performance = Some((Some(result), Some(probability)));
        self
    }

    /// Body returned by `fetch_link`; defaults to an empty `data` list
    pub fn with_link_response(mut self, body: Value) -> Self {
        self.link_response = Some(body);
        self
    }

    /// Calls received so far, oldest first
    pub fn calls(&self) -> &[ProviderCall] {
        &self.calls
    }

    fn record(&mut self, call: ProviderCall) -> Result<(), ProviderError> {
        self.calls.push(call);
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl FlightDataProvider for MockFlightProvider {
    fn search_offers(&mut self, params: &OfferSearchParams) -> Result<Vec<Offer>, ProviderError> {
        self.record(ProviderCall::Offers(params.clone()))?;
        Ok(self.offers.clone())
    }

    fn search_availability(
        &mut self,
        params: &AvailabilityParams,
    ) -> Result<Vec<AvailabilityRecord>, ProviderError> {
        self.record(ProviderCall::Availability(params.clone()))?;
        Ok(self.availability.clone())
    }

    fn search_destinations(
        &mut self,
        params: &DestinationParams,
    ) -> Result<Vec<DestinationRecord>, ProviderError> {
        self.record(ProviderCall::Destinations(params.clone()))?;
        Ok(self.destinations.clone())
    }

    fn on_time_performance(
        &mut self,
        airport_code: &IataCode,
        date: NaiveDate,
    ) -> Result<PerformanceRecord, ProviderError> {
        self.record(ProviderCall::OnTime(airport_code.clone(), date))?;
        let (result, probability) = self.performance.unwrap_or((None, None));
        Ok(PerformanceRecord {
            airport_code: airport_code.to_string(),
            date,
            result,
            probability,
        })
    }

    fn fetch_link(&mut self, url: &str) -> Result<Value, ProviderError> {
        self.record(ProviderCall::Link(url.to_string()))?;
        Ok(self
            .link_response
            .clone()
            .unwrap_or_else(|| json!({ "data": [] })))
    }
}
