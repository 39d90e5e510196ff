//! Flightdesk flight data provider
//!
//! Typed boundary to the flight-data API: request parameters built from
//! extracted query parameters, one operation per search, and an Amadeus
//! client behind the [`FlightDataProvider`] trait.
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use flightdesk_domain::{IataCode, TravelClass};
//! use flightdesk_provider::{AmadeusClient, FlightDataProvider, OfferSearchParams, ProviderConfig};
//!
//! let mut client = AmadeusClient::new("api-key", "api-secret", ProviderConfig::default())
//!     .expect("Invalid client configuration");
//! client.connect().expect("Failed to connect");
//!
//! let params = OfferSearchParams {
//!     origin: IataCode::parse("CDG").unwrap(),
//!     destination: IataCode::parse("NRT").unwrap(),
//!     departure_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
//!     return_date: None,
//!     travel_class: TravelClass::Economy,
//!     adults: 1,
//!     max_results: 3,
//! };
//! let offers = client.search_offers(&params).expect("Search failed");
//! println!("{} offers", offers.len());
//!
//! client.disconnect();
//! ```

#![warn(missing_docs)]

mod client;
mod error;
mod mock;
mod params;
mod provider;
mod records;
mod session;

pub use client::{AmadeusClient, ProviderConfig, DEFAULT_BASE_URL};
pub use error::ProviderError;
pub use mock::{MockFlightProvider, ProviderCall};
pub use params::{AvailabilityParams, DestinationParams, OfferSearchParams, OnTimeParams};
pub use provider::FlightDataProvider;
pub use records::{
    or_unknown, Aircraft, AvailabilityRecord, DestinationLinks, DestinationPrice,
    DestinationRecord, FlightEndpoint, Itinerary, Offer, PerformanceRecord, Price, Segment,
};
