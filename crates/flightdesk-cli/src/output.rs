//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use flightdesk_domain::Field;
use flightdesk_extractor::ExtractedParameters;
use flightdesk_provider::{
    or_unknown, AvailabilityRecord, DestinationRecord, Offer, PerformanceRecord,
};
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The active output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format extracted parameters.
    pub fn format_parameters(&self, params: &ExtractedParameters) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = json!({
                    "profile": params.profile().as_str(),
                    "complete": params.is_complete(),
                    "parameters": params.to_json(),
                    "defaulted": params.defaulted().iter().map(|f| f.key()).collect::<Vec<_>>(),
                    "missing": params.missing().iter().map(|f| f.key()).collect::<Vec<_>>(),
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(params
                .values()
                .map(|(field, value)| format!("{}={}", field.key(), value))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value", "Source"]);

                for spec in params.profile().fields() {
                    let (value, source) = match params.get(spec.field) {
                        Some(value) if params.is_defaulted(spec.field) => {
                            (value.to_string(), "default")
                        }
                        Some(value) => (value.to_string(), "query"),
                        None if spec.mandatory => ("-".to_string(), "missing"),
                        None => ("-".to_string(), ""),
                    };
                    builder.push_record([spec.field.label().to_string(), value, source.to_string()]);
                }

                let mut output = self.table(builder);
                for issue in params.issues() {
                    output.push('\n');
                    output.push_str(&self.warning(&format!(
                        "Ignored {}: {}",
                        issue.field.key(),
                        issue.reason
                    )));
                }
                Ok(output)
            }
        }
    }

    /// Format flight offers.
    pub fn format_offers(&self, offers: &[Offer]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(offers)?),
            OutputFormat::Quiet => Ok(offers
                .iter()
                .map(|o| {
                    format!(
                        "{} {}",
                        or_unknown(o.price.total.as_deref()),
                        or_unknown(o.price.currency.as_deref())
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if offers.is_empty() {
                    return Ok(self.colorize("No offers found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Price", "Seats", "Flight", "Departure", "Arrival", "Duration"]);

                for offer in offers {
                    let price = format!(
                        "{} {}",
                        or_unknown(offer.price.total.as_deref()),
                        or_unknown(offer.price.currency.as_deref())
                    );
                    let seats = or_unknown(offer.number_of_bookable_seats);

                    for itinerary in &offer.itineraries {
                        for segment in &itinerary.segments {
                            builder.push_record([
                                price.clone(),
                                seats.clone(),
                                format!(
                                    "{}{}",
                                    segment.carrier_code.as_deref().unwrap_or(""),
                                    segment.number.as_deref().unwrap_or("")
                                ),
                                endpoint(
                                    segment.departure.iata_code.as_deref(),
                                    segment.departure.at.map(|t| t.format(TIME_FORMAT)),
                                ),
                                endpoint(
                                    segment.arrival.iata_code.as_deref(),
                                    segment.arrival.at.map(|t| t.format(TIME_FORMAT)),
                                ),
                                or_unknown(segment.duration.as_deref()),
                            ]);
                        }
                    }
                }

                Ok(self.table(builder))
            }
        }
    }

    /// Format seat availability.
    pub fn format_availability(&self, records: &[AvailabilityRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Quiet => Ok(records
                .iter()
                .map(|r| {
                    format!(
                        "{}{}",
                        r.carrier_code.as_deref().unwrap_or(""),
                        r.number.as_deref().unwrap_or("")
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if records.is_empty() {
                    return Ok(self.colorize("No availability found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Carrier", "Flight", "Stops", "Departure", "Arrival", "Duration"]);

                for record in records {
                    builder.push_record([
                        or_unknown(record.carrier_code.as_deref()),
                        or_unknown(record.number.as_deref()),
                        or_unknown(record.number_of_stops),
                        or_unknown(record.departure_time.map(|t| t.format(TIME_FORMAT))),
                        or_unknown(record.arrival_time.map(|t| t.format(TIME_FORMAT))),
                        or_unknown(record.duration.as_deref()),
                    ]);
                }

                Ok(self.table(builder))
            }
        }
    }

    /// Format destination inspiration results.
    pub fn format_destinations(&self, records: &[DestinationRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Quiet => Ok(records
                .iter()
                .map(|r| or_unknown(r.destination.as_deref()))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if records.is_empty() {
                    return Ok(self.colorize("No destinations found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Origin", "Destination", "Departure", "Return", "Price"]);

                for record in records {
                    builder.push_record([
                        or_unknown(record.origin.as_deref()),
                        or_unknown(record.destination.as_deref()),
                        or_unknown(record.departure_date),
                        or_unknown(record.return_date),
                        format!(
                            "{} {}",
                            or_unknown(record.price.total.as_deref()),
                            record.currency.as_deref().unwrap_or("")
                        )
                        .trim_end()
                        .to_string(),
                    ]);
                }

                Ok(self.table(builder))
            }
        }
    }

    /// Format an on-time prediction.
    pub fn format_performance(&self, record: &PerformanceRecord) -> Result<String> {
        let on_time = or_unknown(record.on_time_percentage().map(|p| format!("{:.2}%", p)));
        let accuracy = or_unknown(record.accuracy_percentage().map(|p| format!("{:.2}%", p)));

        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Quiet => Ok(on_time),
            OutputFormat::Table => Ok(format!(
                "{}\n  Predicted On-Time Percentage: {}\n  Prediction Accuracy: {}",
                self.colorize(
                    &format!(
                        "On-Time Performance for {} on {}",
                        record.airport_code, record.date
                    ),
                    "cyan"
                ),
                on_time,
                accuracy
            )),
        }
    }

    /// Explain which mandatory fields a query did not provide.
    pub fn missing_fields(&self, fields: &[Field]) -> String {
        let mut lines = vec![self.warning("The query is missing required information:")];
        for field in fields {
            lines.push(format!("  - {} ({})", field.label(), field.key()));
        }
        lines.join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn endpoint(code: Option<&str>, at: Option<impl std::fmt::Display>) -> String {
    match at {
        Some(at) => format!("{} {}", or_unknown(code), at),
        None => or_unknown(code),
    }
}
