//! On-time command implementation.

use crate::error::Result;
use crate::output::Formatter;
use flightdesk_extractor::ExtractedParameters;
use flightdesk_provider::{FlightDataProvider, OnTimeParams};

/// Execute the on-time command.
pub fn execute_on_time<P: FlightDataProvider>(
    params: &ExtractedParameters,
    provider: &mut P,
    formatter: &Formatter,
) -> Result<String> {
    let lookup = OnTimeParams::try_from(params)?;

    let record = provider.on_time_performance(&lookup.airport_code, lookup.date)?;

    formatter.format_performance(&record)
}
