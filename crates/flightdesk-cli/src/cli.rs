//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use flightdesk_domain::{Field, Profile};
use serde_json::{Map, Value};

/// Flightdesk - search flights from plain-language queries.
#[derive(Debug, Parser)]
#[command(name = "flightdesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (minimal)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search the cheapest flight offers between two places
    Offers(OffersArgs),

    /// Check seat availability between two places
    Availability(AvailabilityArgs),

    /// Find the cheapest destinations from one origin
    Inspire(InspireArgs),

    /// Predict on-time performance at an airport
    OnTime(OnTimeArgs),

    /// Extract search parameters from a query without searching
    Extract(ExtractArgs),

    /// Enter interactive mode
    Repl(ReplArgs),
}

/// Extraction profile argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProfileArg {
    /// Flight offers search
    Offers,
    /// Seat availability search
    Availability,
    /// Destination inspiration search
    Inspiration,
    /// On-time prediction
    OnTime,
}

/// Arguments for the offers command.
#[derive(Debug, Args)]
pub struct OffersArgs {
    /// Plain-language query (e.g. "Paris to Tokyo next Friday")
    #[arg(short, long, conflicts_with_all = ["origin", "destination", "departure_date"])]
    pub query: Option<String>,

    /// Origin IATA code
    #[arg(long)]
    pub origin: Option<String>,

    /// Destination IATA code
    #[arg(long)]
    pub destination: Option<String>,

    /// Departure date (YYYY-MM-DD)
    #[arg(long)]
    pub departure_date: Option<String>,

    /// Return date (YYYY-MM-DD)
    #[arg(long)]
    pub return_date: Option<String>,

    /// Travel class (ECONOMY, PREMIUM_ECONOMY, BUSINESS, FIRST)
    #[arg(long)]
    pub travel_class: Option<String>,

    /// Number of adults
    #[arg(long)]
    pub adults: Option<u32>,

    /// Maximum number of offers
    #[arg(long)]
    pub max_results: Option<u32>,
}

/// Arguments for the availability command.
#[derive(Debug, Args)]
pub struct AvailabilityArgs {
    /// Plain-language query
    #[arg(short, long, conflicts_with_all = ["origin", "destination", "departure_date"])]
    pub query: Option<String>,

    /// Origin IATA code
    #[arg(long)]
    pub origin: Option<String>,

    /// Destination IATA code
    #[arg(long)]
    pub destination: Option<String>,

    /// Departure date (YYYY-MM-DD)
    #[arg(long)]
    pub departure_date: Option<String>,

    /// Number of adults
    #[arg(long)]
    pub adults: Option<u32>,
}

/// Arguments for the inspire command.
#[derive(Debug, Args)]
pub struct InspireArgs {
    /// Plain-language query
    #[arg(short, long, conflicts_with_all = ["origin", "departure_date_range"])]
    pub query: Option<String>,

    /// Origin IATA code
    #[arg(long)]
    pub origin: Option<String>,

    /// Departure date range (YYYY-MM-DD,YYYY-MM-DD)
    #[arg(long)]
    pub departure_date_range: Option<String>,

    /// Only one-way fares
    #[arg(long)]
    pub one_way: bool,

    /// Maximum price
    #[arg(long)]
    pub max_price: Option<u32>,

    /// Also fetch each destination's offers link
    #[arg(long)]
    pub follow_links: bool,
}

/// Arguments for the on-time command.
#[derive(Debug, Args)]
pub struct OnTimeArgs {
    /// Plain-language query (e.g. "Will there be delays at JFK on 2024-12-21?")
    #[arg(short, long, conflicts_with_all = ["airport", "date"])]
    pub query: Option<String>,

    /// Airport IATA code
    #[arg(long)]
    pub airport: Option<String>,

    /// Date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
}

/// Arguments for the extract command.
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Which search to extract parameters for
    #[arg(short, long, value_enum, default_value = "offers")]
    pub profile: ProfileArg,

    /// Query text
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

/// Arguments for the repl command.
#[derive(Debug, Args)]
pub struct ReplArgs {
    /// Search to run for each query
    #[arg(short, long, value_enum, default_value = "offers")]
    pub profile: ProfileArg,
}

fn insert_str(record: &mut Map<String, Value>, field: Field, value: &Option<String>) {
    if let Some(value) = value {
        record.insert(field.key().to_string(), Value::String(value.clone()));
    }
}

fn insert_int(record: &mut Map<String, Value>, field: Field, value: Option<u32>) {
    if let Some(value) = value {
        record.insert(field.key().to_string(), Value::from(value));
    }
}

impl OffersArgs {
    /// Explicit flags as a record for validation
    pub fn to_record(&self) -> Map<String, Value> {
        let mut record = Map::new();
        insert_str(&mut record, Field::Origin, &self.origin);
        insert_str(&mut record, Field::Destination, &self.destination);
        insert_str(&mut record, Field::DepartureDate, &self.departure_date);
        insert_str(&mut record, Field::ReturnDate, &self.return_date);
        insert_str(&mut record, Field::TravelClass, &self.travel_class);
        insert_int(&mut record, Field::Adults, self.adults);
        insert_int(&mut record, Field::MaxResults, self.max_results);
        record
    }
}

impl AvailabilityArgs {
    /// Explicit flags as a record for validation
    pub fn to_record(&self) -> Map<String, Value> {
        let mut record = Map::new();
        insert_str(&mut record, Field::Origin, &self.origin);
        insert_str(&mut record, Field::Destination, &self.destination);
        insert_str(&mut record, Field::DepartureDate, &self.departure_date);
        insert_int(&mut record, Field::Adults, self.adults);
        record
    }
}

impl InspireArgs {
    /// Explicit flags as a record for validation
    pub fn to_record(&self) -> Map<String, Value> {
        let mut record = Map::new();
        insert_str(&mut record, Field::Origin, &self.origin);
        insert_str(&mut record, Field::DepartureDateRange, &self.departure_date_range);
        if self.one_way {
            record.insert(Field::OneWay.key().to_string(), Value::Bool(true));
        }
        insert_int(&mut record, Field::MaxPrice, self.max_price);
        record
    }
}

impl OnTimeArgs {
    /// Explicit flags as a record for validation
    pub fn to_record(&self) -> Map<String, Value> {
        let mut record = Map::new();
        insert_str(&mut record, Field::AirportCode, &self.airport);
        insert_str(&mut record, Field::Date, &self.date);
        record
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ProfileArg> for Profile {
    fn from(profile: ProfileArg) -> Self {
        match profile {
            ProfileArg::Offers => Profile::OfferSearch,
            ProfileArg::Availability => Profile::AvailabilitySearch,
            ProfileArg::Inspiration => Profile::InspirationSearch,
            ProfileArg::OnTime => Profile::OnTimePerformance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offers_with_query() {
        let cli = Cli::parse_from([
            "flightdesk",
            "offers",
            "--query",
            "flights from Paris to Tokyo next Friday",
        ]);
        match cli.command {
            Command::Offers(args) => {
                assert_eq!(
                    args.query.as_deref(),
                    Some("flights from Paris to Tokyo next Friday")
                );
                assert!(args.to_record().is_empty());
            }
            _ => panic!("Expected Offers command"),
        }
    }

    #[test]
    fn test_query_conflicts_with_flags() {
        let result = Cli::try_parse_from([
            "flightdesk",
            "offers",
            "--query",
            "Paris to Tokyo",
            "--origin",
            "CDG",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_query_keeps_optional_flags() {
        let cli = Cli::parse_from([
            "flightdesk",
            "offers",
            "--query",
            "Paris to Tokyo next Friday",
            "--adults",
            "4",
            "--travel-class",
            "BUSINESS",
        ]);
        match cli.command {
            Command::Offers(args) => {
                let record = args.to_record();
                assert_eq!(record["adults"], 4);
                assert_eq!(record["travel_class"], "BUSINESS");
                assert_eq!(record.len(), 2);
            }
            _ => panic!("Expected Offers command"),
        }
    }

    #[test]
    fn test_offers_flags_to_record() {
        let cli = Cli::parse_from([
            "flightdesk",
            "--format",
            "json",
            "offers",
            "--origin",
            "cdg",
            "--destination",
            "NRT",
            "--departure-date",
            "2025-03-14",
            "--adults",
            "2",
        ]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Offers(args) => {
                let record = args.to_record();
                assert_eq!(record["origin"], "cdg");
                assert_eq!(record["adults"], 2);
                assert!(!record.contains_key("return_date"));
            }
            _ => panic!("Expected Offers command"),
        }
    }

    #[test]
    fn test_inspire_one_way_flag() {
        let cli = Cli::parse_from([
            "flightdesk",
            "inspire",
            "--origin",
            "MAD",
            "--departure-date-range",
            "2025-02-01,2025-02-10",
            "--one-way",
            "--follow-links",
        ]);
        match cli.command {
            Command::Inspire(args) => {
                assert!(args.follow_links);
                assert_eq!(args.to_record()["one_way"], true);
            }
            _ => panic!("Expected Inspire command"),
        }
    }

    #[test]
    fn test_extract_joins_words() {
        let cli = Cli::parse_from([
            "flightdesk",
            "extract",
            "--profile",
            "on-time",
            "delays",
            "at",
            "JFK",
        ]);
        match cli.command {
            Command::Extract(args) => {
                assert_eq!(Profile::from(args.profile), Profile::OnTimePerformance);
                assert_eq!(args.text.join(" "), "delays at JFK");
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["flightdesk"]).is_err());
    }
}
