//! Records returned by the provider.
//!
//! Every field the API may omit is an `Option`; [`or_unknown`] renders
//! absent values for display.

use crate::error::ProviderError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

/// Display a value, or `Unknown` when the provider omitted it
pub fn or_unknown<T: Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Arrival or departure point of a segment
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightEndpoint {
    /// Airport code
    pub iata_code: Option<String>,
    /// Local date and time
    pub at: Option<NaiveDateTime>,
}

/// Aircraft equipment
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Aircraft {
    /// Equipment code
    pub code: Option<String>,
}

/// One flight leg
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Where the leg starts
    #[serde(default)]
    pub departure: FlightEndpoint,
    /// Where the leg ends
    #[serde(default)]
    pub arrival: FlightEndpoint,
    /// Marketing carrier
    pub carrier_code: Option<String>,
    /// Flight number
    pub number: Option<String>,
    /// Equipment
    #[serde(default)]
    pub aircraft: Aircraft,
    /// ISO-8601 duration as reported (e.g. `PT2H10M`)
    pub duration: Option<String>,
    /// Stops within this leg
    pub number_of_stops: Option<u32>,
}

/// A sequence of segments in one direction
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Itinerary {
    /// Total duration as reported
    pub duration: Option<String>,
    /// Legs in order
    #[serde(default)]
    pub segments: Vec<Segment>,
}

/// Offer price
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Price {
    /// Currency code
    pub currency: Option<String>,
    /// Total as a decimal string
    pub total: Option<String>,
}

/// A priced flight offer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    /// Offer identifier
    pub id: Option<String>,
    /// Content source (e.g. `GDS`)
    pub source: Option<String>,
    /// Seats still bookable at this price
    pub number_of_bookable_seats: Option<u32>,
    /// Price
    #[serde(default)]
    pub price: Price,
    /// Outbound and (for round trips) inbound
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
}

/// One segment of an availability answer
///
/// `duration` is the flight-level value exactly as the provider reports it.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AvailabilityRecord {
    /// Flight duration as reported
    pub duration: Option<String>,
    /// Marketing carrier
    pub carrier_code: Option<String>,
    /// Flight number
    pub number: Option<String>,
    /// Stops within the segment
    pub number_of_stops: Option<u32>,
    /// Departure time
    pub departure_time: Option<NaiveDateTime>,
    /// Arrival time
    pub arrival_time: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
struct AvailabilityFlight {
    duration: Option<String>,
    #[serde(default)]
    segments: Vec<Segment>,
}

/// Follow-up links on a destination
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationLinks {
    /// Cheapest dates to this destination
    pub flight_dates: Option<String>,
    /// Offers for this destination
    pub flight_offers: Option<String>,
}

/// Total price of a destination
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DestinationPrice {
    /// Total as a decimal string
    pub total: Option<String>,
}

/// A cheap destination from the requested origin
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationRecord {
    /// Origin code
    pub origin: Option<String>,
    /// Destination code
    pub destination: Option<String>,
    /// Outbound date
    pub departure_date: Option<NaiveDate>,
    /// Inbound date
    pub return_date: Option<NaiveDate>,
    /// Price
    #[serde(default)]
    pub price: DestinationPrice,
    /// Currency of the whole response
    #[serde(default)]
    pub currency: Option<String>,
    /// Follow-up links
    #[serde(default)]
    pub links: DestinationLinks,
}

/// On-time prediction for an airport on a day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceRecord {
    /// Airport
    pub airport_code: String,
    /// Day
    pub date: NaiveDate,
    /// Predicted on-time fraction, 0..=1
    pub result: Option<f64>,
    /// Confidence of the prediction, 0..=1
    pub probability: Option<f64>,
}

impl PerformanceRecord {
    /// Predicted on-time share as a percentage
    pub fn on_time_percentage(&self) -> Option<f64> {
        self.result.map(|r| r * 100.0)
    }

    /// Prediction accuracy as a percentage
    pub fn accuracy_percentage(&self) -> Option<f64> {
        self.probability.map(|p| p * 100.0)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
    #[serde(default)]
    meta: Option<Meta>,
}

#[derive(Debug, Default, Deserialize)]
struct Meta {
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    result: Option<String>,
    probability: Option<String>,
}

fn parse_fraction(value: Option<String>) -> Option<f64> {
    value.and_then(|v| v.trim().parse::<f64>().ok())
}

pub(crate) fn parse_offers(body: &str) -> Result<Vec<Offer>, ProviderError> {
    let envelope: Envelope<Vec<Offer>> = serde_json::from_str(body)?;
    Ok(envelope.data)
}

pub(crate) fn parse_availability(body: &str) -> Result<Vec<AvailabilityRecord>, ProviderError> {
    let envelope: Envelope<Vec<AvailabilityFlight>> = serde_json::from_str(body)?;

    let records = envelope
        .data
        .into_iter()
        .flat_map(|flight| {
            let duration = flight.duration;
            flight.segments.into_iter().map(move |segment| AvailabilityRecord {
                duration: duration.clone(),
                carrier_code: segment.carrier_code,
                number: segment.number,
                number_of_stops: segment.number_of_stops,
                departure_time: segment.departure.at,
                arrival_time: segment.arrival.at,
            })
        })
        .collect();

    Ok(records)
}

pub(crate) fn parse_destinations(body: &str) -> Result<Vec<DestinationRecord>, ProviderError> {
    let envelope: Envelope<Vec<DestinationRecord>> = serde_json::from_str(body)?;
    let currency = envelope.meta.and_then(|m| m.currency);

    Ok(envelope
        .data
        .into_iter()
        .map(|mut record| {
            if record.currency.is_none() {
                record.currency = currency.clone();
            }
            record
        })
        .collect())
}

pub(crate) fn parse_performance(
    body: &str,
    airport_code: &str,
    date: NaiveDate,
) -> Result<PerformanceRecord, ProviderError> {
    let envelope: Envelope<Value> = serde_json::from_str(body)?;
    // The endpoint answers with an empty list when it has no prediction
    let prediction: Option<Prediction> = if envelope.data.is_object() {
        Some(serde_json::from_value(envelope.data)?)
    } else {
        None
    };
    let (result, probability) = match prediction {
        Some(p) => (parse_fraction(p.result), parse_fraction(p.probability)),
        None => (None, None),
    };

    Ok(PerformanceRecord {
        airport_code: airport_code.to_string(),
        date,
        result,
        probability,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFERS: &str = r#"{
        "meta": {"count": 1},
        "data": [{
            "type": "flight-offer",
            "id": "1",
            "source": "GDS",
            "numberOfBookableSeats": 9,
            "itineraries": [{
                "duration": "PT14H15M",
                "segments": [{
                    "departure": {"iataCode": "CDG", "terminal": "2E", "at": "2025-03-14T11:00:00"},
                    "arrival": {"iataCode": "NRT", "terminal": "1", "at": "2025-03-15T07:15:00"},
                    "carrierCode": "AF",
                    "number": "276",
                    "aircraft": {"code": "77W"},
                    "duration": "PT14H15M",
                    "numberOfStops": 0
                }]
            }],
            "price": {"currency": "EUR", "total": "1234.56", "base": "900.00"}
        }],
        "dictionaries": {"carriers": {"AF": "AIR FRANCE"}}
    }"#;

    #[test]
    fn test_parse_offers() {
        let offers = parse_offers(OFFERS).unwrap();

        assert_eq!(offers.len(), 1);
        let offer = &offers[0];
        assert_eq!(offer.id.as_deref(), Some("1"));
        assert_eq!(offer.number_of_bookable_seats, Some(9));
        assert_eq!(offer.price.total.as_deref(), Some("1234.56"));
        let segment = &offer.itineraries[0].segments[0];
        assert_eq!(segment.departure.iata_code.as_deref(), Some("CDG"));
        assert_eq!(segment.carrier_code.as_deref(), Some("AF"));
        assert_eq!(segment.aircraft.code.as_deref(), Some("77W"));
        assert_eq!(
            segment.departure.at.map(|t| t.to_string()),
            Some("2025-03-14 11:00:00".to_string())
        );
    }

    #[test]
    fn test_parse_offers_tolerates_missing_fields() {
        let offers = parse_offers(r#"{"data": [{"id": "2"}]}"#).unwrap();
        assert_eq!(offers[0].price.currency, None);
        assert!(offers[0].itineraries.is_empty());
        assert_eq!(or_unknown(offers[0].source.as_deref()), "Unknown");
    }

    #[test]
    fn test_parse_empty_offers() {
        assert!(parse_offers(r#"{"meta": {"count": 0}, "data": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_availability_one_record_per_segment() {
        let body = r#"{"data": [
            {"id": "1", "duration": "PT5H30M", "segments": [
                {"id": "1", "numberOfStops": 0, "carrierCode": "AI", "number": "101",
                 "departure": {"iataCode": "DEL", "at": "2025-01-20T06:00:00"},
                 "arrival": {"iataCode": "BOM", "at": "2025-01-20T08:10:00"}},
                {"id": "2", "numberOfStops": 1,
                 "departure": {"iataCode": "BOM", "at": "2025-01-20T09:00:00"},
                 "arrival": {"iataCode": "GOI"}}
            ]}
        ]}"#;

        let records = parse_availability(body).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].duration.as_deref(), Some("PT5H30M"));
        assert_eq!(records[1].duration.as_deref(), Some("PT5H30M"));
        assert_eq!(records[1].number_of_stops, Some(1));
        assert_eq!(records[1].arrival_time, None);
    }

    #[test]
    fn test_parse_destinations_with_currency() {
        let body = r#"{
            "data": [{
                "type": "flight-destination",
                "origin": "MAD",
                "destination": "OPO",
                "departureDate": "2025-02-03",
                "returnDate": "2025-02-10",
                "price": {"total": "59.97"},
                "links": {
                    "flightDates": "https://test.api.amadeus.com/v1/shopping/flight-dates?origin=MAD&destination=OPO",
                    "flightOffers": "https://test.api.amadeus.com/v2/shopping/flight-offers?originLocationCode=MAD"
                }
            }],
            "meta": {"currency": "EUR", "links": {"self": "x"}}
        }"#;

        let records = parse_destinations(body).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].destination.as_deref(), Some("OPO"));
        assert_eq!(records[0].currency.as_deref(), Some("EUR"));
        assert_eq!(records[0].departure_date, NaiveDate::from_ymd_opt(2025, 2, 3));
        assert!(records[0].links.flight_offers.is_some());
    }

    #[test]
    fn test_parse_performance() {
        let body = r#"{"data": {"id": "JFK20241221", "probability": "0.928", "result": "0.73", "subType": "on-time", "type": "prediction"}, "meta": {}}"#;
        let date = NaiveDate::from_ymd_opt(2024, 12, 21).unwrap();

        let record = parse_performance(body, "JFK", date).unwrap();

        assert_eq!(record.result, Some(0.73));
        assert_eq!(format!("{:.2}", record.on_time_percentage().unwrap()), "73.00");
        assert_eq!(format!("{:.2}", record.accuracy_percentage().unwrap()), "92.80");
    }

    #[test]
    fn test_parse_performance_without_prediction() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 21).unwrap();
        let record = parse_performance(r#"{"data": []}"#, "JFK", date).unwrap();
        assert_eq!(record.on_time_percentage(), None);

        let record = parse_performance(r#"{"data": {"result": "n/a"}}"#, "JFK", date).unwrap();
        assert_eq!(record.result, None);
    }

    #[test]
    fn test_undecodable_body() {
        assert!(matches!(parse_offers("<html>"), Err(ProviderError::Decode(_))));
    }
}
