//! Extraction profiles and their field tables
//!
//! A profile names one kind of search and fixes which fields it needs,
//! which of them are mandatory, and the format each must satisfy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Expected format of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// 3-letter uppercase IATA code
    Iata,
    /// ISO-8601 `YYYY-MM-DD`
    Date,
    /// `YYYY-MM-DD,YYYY-MM-DD`, first date not after the second
    DateRange,
    /// true / false
    Boolean,
    /// Integer >= 1, optionally capped
    PositiveInt {
        /// Inclusive upper bound
        max: Option<u32>,
    },
    /// One of ECONOMY, PREMIUM_ECONOMY, BUSINESS, FIRST
    TravelClass,
}

impl FieldFormat {
    /// Human-readable format description used in prompts and messages
    pub fn describe(&self) -> String {
        match self {
            FieldFormat::Iata => "3-letter IATA code, uppercase (e.g. CDG)".to_string(),
            FieldFormat::Date => "ISO date YYYY-MM-DD".to_string(),
            FieldFormat::DateRange => {
                "ISO date range YYYY-MM-DD,YYYY-MM-DD (start not after end)".to_string()
            }
            FieldFormat::Boolean => "boolean true or false".to_string(),
            FieldFormat::PositiveInt { max: Some(max) } => {
                format!("integer between 1 and {}", max)
            }
            FieldFormat::PositiveInt { max: None } => "positive integer".to_string(),
            FieldFormat::TravelClass => {
                "one of ECONOMY, PREMIUM_ECONOMY, BUSINESS, FIRST".to_string()
            }
        }
    }
}

/// Named field that can appear in extracted parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Departure airport or city
    Origin,
    /// Arrival airport or city
    Destination,
    /// Outbound date
    DepartureDate,
    /// Inbound date for round trips
    ReturnDate,
    /// Cabin class
    TravelClass,
    /// Number of adult travellers
    Adults,
    /// Maximum number of offers to return
    MaxResults,
    /// Window of acceptable departure dates
    DepartureDateRange,
    /// Whether only one-way trips are wanted
    OneWay,
    /// Price ceiling
    MaxPrice,
    /// Airport the on-time prediction is for
    AirportCode,
    /// Day the on-time prediction is for
    Date,
}

impl Field {
    /// Key used in the JSON record exchanged with the model
    pub fn key(&self) -> &'static str {
        match self {
            Field::Origin => "origin",
            Field::Destination => "destination",
            Field::DepartureDate => "departure_date",
            Field::ReturnDate => "return_date",
            Field::TravelClass => "travel_class",
            Field::Adults => "adults",
            Field::MaxResults => "max_results",
            Field::DepartureDateRange => "departure_date_range",
            Field::OneWay => "one_way",
            Field::MaxPrice => "max_price",
            Field::AirportCode => "airport_code",
            Field::Date => "date",
        }
    }

    /// Short description of what the field holds
    pub fn label(&self) -> &'static str {
        match self {
            Field::Origin => "Origin city or airport (convert to IATA code if necessary)",
            Field::Destination => {
                "Destination city or airport (convert to IATA code if necessary)"
            }
            Field::DepartureDate => "Departure date",
            Field::ReturnDate => "Return date",
            Field::TravelClass => "Travel class",
            Field::Adults => "Number of adult passengers",
            Field::MaxResults => "Maximum number of results to return",
            Field::DepartureDateRange => "Range of acceptable departure dates",
            Field::OneWay => "Whether the user wants a one-way trip",
            Field::MaxPrice => "Maximum price",
            Field::AirportCode => "Airport (convert to the main international IATA code)",
            Field::Date => "Date of interest",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One row of a profile's field table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// The field
    pub field: Field,
    /// Format it must satisfy
    pub format: FieldFormat,
    /// Whether the search cannot run without it
    pub mandatory: bool,
}

const fn mandatory(field: Field, format: FieldFormat) -> FieldSpec {
    FieldSpec { field, format, mandatory: true }
}

const fn optional(field: Field, format: FieldFormat) -> FieldSpec {
    FieldSpec { field, format, mandatory: false }
}

const ADULTS_FORMAT: FieldFormat = FieldFormat::PositiveInt { max: Some(9) };

const OFFER_SEARCH_FIELDS: &[FieldSpec] = &[
    mandatory(Field::Origin, FieldFormat::Iata),
    mandatory(Field::Destination, FieldFormat::Iata),
    mandatory(Field::DepartureDate, FieldFormat::Date),
    optional(Field::ReturnDate, FieldFormat::Date),
    optional(Field::TravelClass, FieldFormat::TravelClass),
    optional(Field::Adults, ADULTS_FORMAT),
    optional(Field::MaxResults, FieldFormat::PositiveInt { max: Some(250) }),
];

const INSPIRATION_SEARCH_FIELDS: &[FieldSpec] = &[
    mandatory(Field::Origin, FieldFormat::Iata),
    mandatory(Field::DepartureDateRange, FieldFormat::DateRange),
    optional(Field::OneWay, FieldFormat::Boolean),
    optional(Field::MaxPrice, FieldFormat::PositiveInt { max: None }),
];

const AVAILABILITY_SEARCH_FIELDS: &[FieldSpec] = &[
    mandatory(Field::Origin, FieldFormat::Iata),
    mandatory(Field::Destination, FieldFormat::Iata),
    mandatory(Field::DepartureDate, FieldFormat::Date),
    optional(Field::Adults, ADULTS_FORMAT),
];

const ON_TIME_PERFORMANCE_FIELDS: &[FieldSpec] = &[
    mandatory(Field::AirportCode, FieldFormat::Iata),
    mandatory(Field::Date, FieldFormat::Date),
];

/// Kind of search a query is extracted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    /// Cheapest flight offers between two places
    OfferSearch,

    /// Cheapest destinations from one origin
    InspirationSearch,

    /// Seat availability between two places
    AvailabilitySearch,

    /// On-time prediction for an airport on a day
    OnTimePerformance,
}

impl Profile {
    /// All profiles, in display order
    pub const ALL: [Profile; 4] = [
        Profile::OfferSearch,
        Profile::InspirationSearch,
        Profile::AvailabilitySearch,
        Profile::OnTimePerformance,
    ];

    /// Get the profile name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::OfferSearch => "offer-search",
            Profile::InspirationSearch => "inspiration-search",
            Profile::AvailabilitySearch => "availability-search",
            Profile::OnTimePerformance => "on-time-performance",
        }
    }

    /// Parse a profile from its name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "offer-search" | "offers" => Some(Profile::OfferSearch),
            "inspiration-search" | "inspiration" => Some(Profile::InspirationSearch),
            "availability-search" | "availability" => Some(Profile::AvailabilitySearch),
            "on-time-performance" | "on-time" => Some(Profile::OnTimePerformance),
            _ => None,
        }
    }

    /// What the user is trying to do, phrased for the model
    pub fn purpose(&self) -> &'static str {
        match self {
            Profile::OfferSearch => "find the cheapest flight offers between two places",
            Profile::InspirationSearch => "find the cheapest destinations to fly to from one place",
            Profile::AvailabilitySearch => "check seat availability between two places",
            Profile::OnTimePerformance => "predict whether flights at an airport will be on time",
        }
    }

    /// The field table, mandatory fields first
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Profile::OfferSearch => OFFER_SEARCH_FIELDS,
            Profile::InspirationSearch => INSPIRATION_SEARCH_FIELDS,
            Profile::AvailabilitySearch => AVAILABILITY_SEARCH_FIELDS,
            Profile::OnTimePerformance => ON_TIME_PERFORMANCE_FIELDS,
        }
    }

    /// Look up the spec for one field, if this profile has it
    pub fn spec(&self, field: Field) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|spec| spec.field == field)
    }

    /// Mandatory fields in table order
    pub fn mandatory_fields(&self) -> Vec<Field> {
        self.fields()
            .iter()
            .filter(|spec| spec.mandatory)
            .map(|spec| spec.field)
            .collect()
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid profile: {}", s))
    }
}
