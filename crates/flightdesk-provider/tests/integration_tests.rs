//! Integration tests for the flight data provider
//!
//! Live API tests need real credentials and are ignored by default:
//! `AMADEUS_API_KEY=... AMADEUS_SECRET=... cargo test -p flightdesk-provider -- --ignored`

use chrono::NaiveDate;
use flightdesk_domain::{Field, IataCode, Profile};
use flightdesk_extractor::{validate_record, ExtractorConfig};
use flightdesk_provider::{
    AmadeusClient, AvailabilityRecord, DestinationParams, FlightDataProvider, MockFlightProvider,
    Offer, OfferSearchParams, ProviderCall, ProviderConfig, ProviderError,
};
use serde_json::json;

fn offer_params() -> OfferSearchParams {
    let record = json!({"origin": "cdg", "destination": "NRT", "departure_date": "2025-03-14"});
    let params = validate_record(
        Profile::OfferSearch,
        record.as_object().unwrap(),
        &ExtractorConfig::default(),
    );
    OfferSearchParams::try_from(&params).unwrap()
}

#[test]
fn test_not_connected_error() {
    let mut client = AmadeusClient::new("key", "secret", ProviderConfig::default()).unwrap();

    let result = client.search_offers(&offer_params());

    assert!(matches!(result.unwrap_err(), ProviderError::NotConnected));
}

#[test]
fn test_connection_failure() {
    let config = ProviderConfig {
        base_url: "http://localhost:99999".to_string(),
        timeout_secs: 2,
        ..ProviderConfig::default()
    };
    let mut client = AmadeusClient::new("key", "secret", config).unwrap();

    let result = client.connect();

    assert!(result.is_err());
    assert!(!client.is_connected());
}

#[test]
fn test_disconnect_drops_token() {
    let mut client = AmadeusClient::new("key", "secret", ProviderConfig::default()).unwrap();
    client.disconnect();

    let code = IataCode::parse("JFK").unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 12, 21).unwrap();
    let result = client.on_time_performance(&code, date);

    assert!(matches!(result.unwrap_err(), ProviderError::NotConnected));
}

#[test]
fn test_mock_offers_flow() {
    let mut provider = MockFlightProvider::new().with_offers(vec![Offer::default(), Offer::default()]);
    let params = offer_params();

    let offers = provider.search_offers(&params).unwrap();

    assert_eq!(offers.len(), 2);
    assert_eq!(provider.calls(), &[ProviderCall::Offers(params.clone())]);
    assert_eq!(params.origin.as_str(), "CDG");
}

#[test]
fn test_mock_empty_result_set() {
    let mut provider = MockFlightProvider::new();
    let record = json!({"origin": "MAD", "departure_date_range": "2025-02-01,2025-02-10"});
    let params = validate_record(
        Profile::InspirationSearch,
        record.as_object().unwrap(),
        &ExtractorConfig::default(),
    );

    let destinations = provider
        .search_destinations(&DestinationParams::try_from(&params).unwrap())
        .unwrap();

    assert!(destinations.is_empty());
}

#[test]
fn test_mock_failure_is_typed() {
    let mut provider = MockFlightProvider::failing(ProviderError::Api {
        status: 400,
        detail: "INVALID DATE".to_string(),
    });

    let result = provider.search_offers(&offer_params());

    match result {
        Err(ProviderError::Api { status, detail }) => {
            assert_eq!(status, 400);
            assert_eq!(detail, "INVALID DATE");
        }
        other => panic!("Unexpected result: {:?}", other),
    }
    assert_eq!(provider.calls().len(), 1);
}

#[test]
fn test_incomplete_parameters_never_reach_provider() {
    let record = json!({"origin": "CDG", "destination": "TOKYO", "departure_date": "2025-03-14"});
    let params = validate_record(
        Profile::OfferSearch,
        record.as_object().unwrap(),
        &ExtractorConfig::default(),
    );

    let err = OfferSearchParams::try_from(&params).unwrap_err();

    assert_eq!(err, ProviderError::MissingParameters(vec![Field::Destination]));
}

#[test]
fn test_mock_availability_passthrough() {
    let record = AvailabilityRecord {
        duration: Some("PT2H10M".to_string()),
        number_of_stops: Some(0),
        ..AvailabilityRecord::default()
    };
    let mut provider = MockFlightProvider::new().with_availability(vec![record.clone()]);
    let params = flightdesk_provider::AvailabilityParams {
        origin: IataCode::parse("DEL").unwrap(),
        destination: IataCode::parse("BOM").unwrap(),
        departure_date: NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
        adults: 1,
    };

    let records = provider.search_availability(&params).unwrap();

    assert_eq!(records, vec![record]);
}

#[test]
#[ignore]
fn test_live_on_time_prediction() {
    let key = std::env::var("AMADEUS_API_KEY").expect("AMADEUS_API_KEY not set");
    let secret = std::env::var("AMADEUS_SECRET").expect("AMADEUS_SECRET not set");
    let mut client = AmadeusClient::new(key, secret, ProviderConfig::default()).unwrap();
    client.connect().unwrap();

    let code = IataCode::parse("JFK").unwrap();
    let date = chrono::Local::now().date_naive() + chrono::Duration::days(7);
    let record = client.on_time_performance(&code, date).unwrap();

    assert_eq!(record.airport_code, "JFK");
}
