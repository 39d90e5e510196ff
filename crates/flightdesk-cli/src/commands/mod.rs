//! Command implementations.
//!
//! Each command resolves its parameters (from a query or from flags), runs
//! one search against a [`FlightDataProvider`] and returns the formatted
//! output.

pub mod availability;
pub mod extract;
pub mod inspire;
pub mod offers;
pub mod on_time;
pub mod resolve;

pub use self::availability::execute_availability;
pub use self::extract::execute_extract;
pub use self::inspire::execute_inspire;
pub use self::offers::execute_offers;
pub use self::on_time::execute_on_time;
pub use self::resolve::{
    build_extractor, connect_provider, from_flags, from_query, provider_credentials,
    require_complete, resolve, with_flags,
};

use crate::error::Result;
use crate::output::Formatter;
use flightdesk_domain::Profile;
use flightdesk_extractor::ExtractedParameters;
use flightdesk_provider::FlightDataProvider;

/// Run the search matching the parameters' profile.
pub fn run_search<P: FlightDataProvider>(
    params: &ExtractedParameters,
    provider: &mut P,
    formatter: &Formatter,
) -> Result<String> {
    match params.profile() {
        Profile::OfferSearch => execute_offers(params, provider, formatter),
        Profile::AvailabilitySearch => execute_availability(params, provider, formatter),
        Profile::InspirationSearch => execute_inspire(params, false, provider, formatter),
        Profile::OnTimePerformance => execute_on_time(params, provider, formatter),
    }
}
