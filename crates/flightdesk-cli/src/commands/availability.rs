//! Availability command implementation.

use crate::error::Result;
use crate::output::Formatter;
use flightdesk_extractor::ExtractedParameters;
use flightdesk_provider::{AvailabilityParams, FlightDataProvider};
use tracing::info;

/// Execute the availability command.
pub fn execute_availability<P: FlightDataProvider>(
    params: &ExtractedParameters,
    provider: &mut P,
    formatter: &Formatter,
) -> Result<String> {
    let search = AvailabilityParams::try_from(params)?;

    let records = provider.search_availability(&search)?;
    info!("Provider returned {} segment(s)", records.len());

    formatter.format_availability(&records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use flightdesk_domain::Profile;
    use flightdesk_extractor::{validate_record, ExtractorConfig};
    use flightdesk_provider::{AvailabilityRecord, MockFlightProvider};
    use serde_json::json;

    #[test]
    fn test_availability_lists_segments() {
        let record = json!({"origin": "MAD", "destination": "BCN", "departure_date": "2025-05-02", "adults": 2});
        let params = validate_record(
            Profile::AvailabilitySearch,
            record.as_object().unwrap(),
            &ExtractorConfig::default(),
        );
        let mut provider = MockFlightProvider::new().with_availability(vec![AvailabilityRecord {
            carrier_code: Some("VY".to_string()),
            number: Some("1001".to_string()),
            duration: Some("PT1H15M".to_string()),
            ..AvailabilityRecord::default()
        }]);
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let output = execute_availability(&params, &mut provider, &formatter).unwrap();
        assert_eq!(output, "VY1001");
    }
}
