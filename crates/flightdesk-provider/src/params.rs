//! Request parameters for each search.
//!
//! Every struct can be built directly or converted from a complete
//! [`ExtractedParameters`] of the matching profile.

use crate::error::ProviderError;
use chrono::NaiveDate;
use flightdesk_domain::{DateRange, Field, IataCode, Profile, TravelClass};
use flightdesk_extractor::ExtractedParameters;
use serde::Serialize;
use serde_json::{json, Value};

fn date_str(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn check(params: &ExtractedParameters, expected: Profile) -> Result<(), ProviderError> {
    if params.profile() != expected {
        return Err(ProviderError::ProfileMismatch {
            expected,
            actual: params.profile(),
        });
    }
    if !params.is_complete() {
        return Err(ProviderError::MissingParameters(params.missing().to_vec()));
    }
    Ok(())
}

fn required<T>(value: Option<T>, field: Field) -> Result<T, ProviderError> {
    value.ok_or_else(|| ProviderError::MissingParameters(vec![field]))
}

/// Flight offers search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferSearchParams {
    /// Departure airport or city
    pub origin: IataCode,
    /// Arrival airport or city
    pub destination: IataCode,
    /// Outbound date
    pub departure_date: NaiveDate,
    /// Inbound date, for round trips
    pub return_date: Option<NaiveDate>,
    /// Cabin
    pub travel_class: TravelClass,
    /// Adult travellers
    pub adults: u32,
    /// Maximum offers to return
    pub max_results: u32,
}

impl OfferSearchParams {
    /// Query string pairs for the offers endpoint
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("originLocationCode", self.origin.to_string()),
            ("destinationLocationCode", self.destination.to_string()),
            ("departureDate", date_str(self.departure_date)),
            ("adults", self.adults.to_string()),
            ("max", self.max_results.to_string()),
            ("travelClass", self.travel_class.as_str().to_string()),
        ];
        if let Some(return_date) = self.return_date {
            pairs.push(("returnDate", date_str(return_date)));
        }
        pairs
    }
}

impl TryFrom<&ExtractedParameters> for OfferSearchParams {
    type Error = ProviderError;

    fn try_from(params: &ExtractedParameters) -> Result<Self, Self::Error> {
        check(params, Profile::OfferSearch)?;

        Ok(Self {
            origin: required(params.iata(Field::Origin).cloned(), Field::Origin)?,
            destination: required(params.iata(Field::Destination).cloned(), Field::Destination)?,
            departure_date: required(params.date(Field::DepartureDate), Field::DepartureDate)?,
            return_date: params.date(Field::ReturnDate),
            travel_class: params.travel_class(Field::TravelClass).unwrap_or_default(),
            adults: params.int(Field::Adults).unwrap_or(1),
            max_results: params.int(Field::MaxResults).unwrap_or(3),
        })
    }
}

/// Seat availability search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityParams {
    /// Departure airport or city
    pub origin: IataCode,
    /// Arrival airport or city
    pub destination: IataCode,
    /// Day of travel
    pub departure_date: NaiveDate,
    /// Adult travellers
    pub adults: u32,
}

impl AvailabilityParams {
    /// JSON body for the availability endpoint
    ///
    /// One origin-destination pair and one `ADULT` traveler per adult.
    pub fn request_body(&self) -> Value {
        let travelers: Vec<Value> = (1..=self.adults.max(1))
            .map(|id| json!({ "id": id.to_string(), "travelerType": "ADULT" }))
            .collect();

        json!({
            "originDestinations": [{
                "id": "1",
                "originLocationCode": self.origin.as_str(),
                "destinationLocationCode": self.destination.as_str(),
                "departureDateTime": { "date": date_str(self.departure_date) },
            }],
            "travelers": travelers,
            "sources": ["GDS"],
        })
    }
}

impl TryFrom<&ExtractedParameters> for AvailabilityParams {
    type Error = ProviderError;

    fn try_from(params: &ExtractedParameters) -> Result<Self, Self::Error> {
        check(params, Profile::AvailabilitySearch)?;

        Ok(Self {
            origin: required(params.iata(Field::Origin).cloned(), Field::Origin)?,
            destination: required(params.iata(Field::Destination).cloned(), Field::Destination)?,
            departure_date: required(params.date(Field::DepartureDate), Field::DepartureDate)?,
            adults: params.int(Field::Adults).unwrap_or(1),
        })
    }
}

/// Cheapest-destinations search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationParams {
    /// Departure airport or city
    pub origin: IataCode,
    /// Window of departure dates
    pub departure_date_range: DateRange,
    /// Restrict to one-way fares
    pub one_way: Option<bool>,
    /// Price ceiling
    pub max_price: Option<u32>,
}

impl DestinationParams {
    /// Query string pairs for the destinations endpoint
    pub fn query_pairs(&self, view_by: &str) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("origin", self.origin.to_string()),
            ("departureDate", self.departure_date_range.to_string()),
        ];
        if let Some(one_way) = self.one_way {
            pairs.push(("oneWay", one_way.to_string()));
        }
        if let Some(max_price) = self.max_price {
            pairs.push(("maxPrice", max_price.to_string()));
        }
        if !view_by.is_empty() {
            pairs.push(("viewBy", view_by.to_string()));
        }
        pairs
    }
}

impl TryFrom<&ExtractedParameters> for DestinationParams {
    type Error = ProviderError;

    fn try_from(params: &ExtractedParameters) -> Result<Self, Self::Error> {
        check(params, Profile::InspirationSearch)?;

        Ok(Self {
            origin: required(params.iata(Field::Origin).cloned(), Field::Origin)?,
            departure_date_range: required(
                params.date_range(Field::DepartureDateRange),
                Field::DepartureDateRange,
            )?,
            one_way: params.boolean(Field::OneWay),
            max_price: params.int(Field::MaxPrice),
        })
    }
}

/// On-time prediction lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnTimeParams {
    /// Airport
    pub airport_code: IataCode,
    /// Day of interest
    pub date: NaiveDate,
}

impl TryFrom<&ExtractedParameters> for OnTimeParams {
    type Error = ProviderError;

    fn try_from(params: &ExtractedParameters) -> Result<Self, Self::Error> {
        check(params, Profile::OnTimePerformance)?;

        Ok(Self {
            airport_code: required(params.iata(Field::AirportCode).cloned(), Field::AirportCode)?,
            date: required(params.date(Field::Date), Field::Date)?,
        })
    }
}
