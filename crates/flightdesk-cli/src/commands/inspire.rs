//! Inspire command implementation.

use crate::error::Result;
use crate::output::Formatter;
use flightdesk_extractor::ExtractedParameters;
use flightdesk_provider::{or_unknown, DestinationParams, DestinationRecord, FlightDataProvider};
use tracing::{info, warn};

/// Execute the inspire command.
///
/// With `follow_links`, each destination's offers link is fetched too and
/// the number of offers it holds is appended. A failing link only produces
/// a warning line.
pub fn execute_inspire<P: FlightDataProvider>(
    params: &ExtractedParameters,
    follow_links: bool,
    provider: &mut P,
    formatter: &Formatter,
) -> Result<String> {
    let search = DestinationParams::try_from(params)?;

    let records = provider.search_destinations(&search)?;
    info!("Provider returned {} destination(s)", records.len());

    let mut output = formatter.format_destinations(&records)?;
    if follow_links && !records.is_empty() {
        output.push('\n');
        output.push_str(&follow_offer_links(&records, provider, formatter));
    }

    Ok(output)
}

fn follow_offer_links<P: FlightDataProvider>(
    records: &[DestinationRecord],
    provider: &mut P,
    formatter: &Formatter,
) -> String {
    let mut lines = Vec::new();

    for record in records {
        let destination = or_unknown(record.destination.as_deref());
        let Some(link) = record.links.flight_offers.as_deref() else {
            continue;
        };

        match provider.fetch_link(link) {
            Ok(body) => {
                let count = body
                    .get("data")
                    .and_then(|d| d.as_array())
                    .map(|d| d.len())
                    .unwrap_or(0);
                lines.push(formatter.info(&format!("{}: {} offer(s)", destination, count)));
            }
            Err(e) => {
                warn!("Failed to follow offers link for {}: {}", destination, e);
                lines.push(formatter.warning(&format!("{}: {}", destination, e)));
            }
        }
    }

    lines.join("\n")
}
