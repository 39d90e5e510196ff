//! Offers command implementation.

use crate::error::Result;
use crate::output::Formatter;
use flightdesk_extractor::ExtractedParameters;
use flightdesk_provider::{FlightDataProvider, OfferSearchParams};
use tracing::info;

/// Execute the offers command.
pub fn execute_offers<P: FlightDataProvider>(
    params: &ExtractedParameters,
    provider: &mut P,
    formatter: &Formatter,
) -> Result<String> {
    let search = OfferSearchParams::try_from(params)?;

    let offers = provider.search_offers(&search)?;
    info!("Provider returned {} offer(s)", offers.len());

    formatter.format_offers(&offers)
}
