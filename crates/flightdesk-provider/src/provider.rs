//! The flight data provider boundary.

use crate::error::ProviderError;
use crate::params::{AvailabilityParams, DestinationParams, OfferSearchParams};
use crate::records::{AvailabilityRecord, DestinationRecord, Offer, PerformanceRecord};
use chrono::NaiveDate;
use flightdesk_domain::IataCode;
use serde_json::Value;

/// One operation per search profile
///
/// Methods take `&mut self` because real clients refresh their access
/// token and mocks record calls.
pub trait FlightDataProvider {
    /// Cheapest offers between two places
    fn search_offers(&mut self, params: &OfferSearchParams) -> Result<Vec<Offer>, ProviderError>;

    /// Seat availability between two places, one record per segment
    fn search_availability(
        &mut self,
        params: &AvailabilityParams,
    ) -> Result<Vec<AvailabilityRecord>, ProviderError>;

    /// Cheapest destinations from one origin
    fn search_destinations(
        &mut self,
        params: &DestinationParams,
    ) -> Result<Vec<DestinationRecord>, ProviderError>;

    /// On-time prediction for an airport on a day
    fn on_time_performance(
        &mut self,
        airport_code: &IataCode,
        date: NaiveDate,
    ) -> Result<PerformanceRecord, ProviderError>;

    /// Authorized GET of a follow-up link from an earlier response
    fn fetch_link(&mut self, url: &str) -> Result<Value, ProviderError>;
}
