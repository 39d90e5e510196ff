//! Integration tests for the QueryExtractor

#[cfg(test)]
mod tests {
    use crate::{
        Completeness, ExtractionRequest, ExtractorConfig, ExtractorError, QueryExtractor,
    };
    use chrono::NaiveDate;
    use flightdesk_domain::{Field, FieldFormat, Profile, TravelClass};
    use flightdesk_llm::MockProvider;
    use proptest::prelude::*;

    fn extractor(reply: &str) -> (QueryExtractor<MockProvider>, MockProvider) {
        let llm = MockProvider::new(reply);
        let handle = llm.clone();
        let extractor = QueryExtractor::new(llm, ExtractorConfig::default())
            .unwrap()
            .with_reference_date(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        (extractor, handle)
    }

    #[test]
    fn test_paris_to_tokyo_is_complete_with_defaults() {
        let (extractor, llm) = extractor(
            r#"{"origin": "CDG", "destination": "NRT", "departure_date": "2025-03-14"}"#,
        );
        let request = ExtractionRequest::new(
            "flights from Paris to Tokyo next Friday",
            Profile::OfferSearch,
        );

        let params = extractor.extract(&request).unwrap();

        assert_eq!(params.completeness(), Completeness::Complete);
        assert_eq!(params.iata(Field::Origin).unwrap().as_str(), "CDG");
        assert_eq!(params.iata(Field::Destination).unwrap().as_str(), "NRT");
        assert_eq!(
            params.date(Field::DepartureDate),
            NaiveDate::from_ymd_opt(2025, 3, 14)
        );
        assert_eq!(params.int(Field::Adults), Some(1));
        assert_eq!(params.travel_class(Field::TravelClass), Some(TravelClass::Economy));
        assert_eq!(params.int(Field::MaxResults), Some(3));
        assert!(params.get(Field::ReturnDate).is_none());
        assert_eq!(llm.call_count(), 1);
    }

    #[test]
    fn test_prompt_carries_query_and_reference_date() {
        let (extractor, llm) = extractor("{}");
        let request = ExtractionRequest::new("JFK to LAX tomorrow", Profile::OfferSearch);

        let _ = extractor.extract(&request);

        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.contains("JFK to LAX tomorrow"));
        assert!(prompt.contains("2025-03-10"));
        assert!(prompt.contains("departure_date"));
    }

    #[test]
    fn test_empty_reply_fails_with_defaults() {
        let (extractor, llm) = extractor("");
        let request = ExtractionRequest::new("somewhere warm", Profile::OfferSearch);

        let failure = extractor.extract(&request).unwrap_err();

        assert!(matches!(failure.error, ExtractorError::InvalidFormat(_)));
        assert_eq!(
            failure.fallback.missing(),
            &[Field::Origin, Field::Destination, Field::DepartureDate]
        );
        assert_eq!(failure.fallback.int(Field::Adults), Some(1));
        assert_eq!(failure.fallback.int(Field::MaxResults), Some(3));
        assert_eq!(
            failure.fallback.travel_class(Field::TravelClass),
            Some(TravelClass::Economy)
        );
        assert_eq!(llm.call_count(), 1);
    }

    #[test]
    fn test_malformed_replies_fail_without_panicking() {
        let replies = [
            "not json at all",
            "{'origin': 'CDG'}",
            "[1, 2, 3]",
            "```json\n{\"origin\": \"CDG\"",
            "{\"origin\": \"CDG\",}",
            "42",
        ];

        for reply in replies {
            let (extractor, _) = extractor(reply);
            let request = ExtractionRequest::new("Paris to Tokyo", Profile::OfferSearch);
            let failure = extractor.extract(&request).unwrap_err();
            assert!(!failure.fallback.is_complete(), "reply: {}", reply);
            assert!(!failure.reason().is_empty());
        }
    }

    #[test]
    fn test_llm_failure_is_a_value() {
        let llm = MockProvider::failing("connection refused");
        let extractor = QueryExtractor::new(llm, ExtractorConfig::default()).unwrap();
        let request = ExtractionRequest::new("JFK on-time tomorrow", Profile::OnTimePerformance);

        let failure = extractor.extract(&request).unwrap_err();

        assert!(matches!(failure.error, ExtractorError::Llm(_)));
        assert!(failure.reason().contains("connection refused"));
        assert_eq!(failure.fallback.missing(), &[Field::AirportCode, Field::Date]);
    }

    #[test]
    fn test_empty_query_skips_llm() {
        let (extractor, llm) = extractor("{}");
        let request = ExtractionRequest::new("   ", Profile::OfferSearch);

        let failure = extractor.extract(&request).unwrap_err();

        assert_eq!(failure.error, ExtractorError::EmptyQuery);
        assert_eq!(llm.call_count(), 0);
    }

    #[test]
    fn test_query_too_long_skips_llm() {
        let llm = MockProvider::new("{}");
        let handle = llm.clone();
        let config = ExtractorConfig {
            max_query_length: 10,
            ..ExtractorConfig::default()
        };
        let extractor = QueryExtractor::new(llm, config).unwrap();
        let request = ExtractionRequest::new("a".repeat(11), Profile::OfferSearch);

        let failure = extractor.extract(&request).unwrap_err();

        assert_eq!(failure.error, ExtractorError::QueryTooLong(11, 10));
        assert_eq!(handle.call_count(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExtractorConfig {
            default_adults: 0,
            ..ExtractorConfig::default()
        };
        let result = QueryExtractor::new(MockProvider::new("{}"), config);
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_missing_destination_is_incomplete() {
        let (extractor, _) = extractor(
            r#"{"origin": "CDG", "destination": null, "departure_date": "2025-03-14"}"#,
        );
        let request = ExtractionRequest::new("from Paris on the 14th", Profile::OfferSearch);

        let params = extractor.extract(&request).unwrap();

        assert_eq!(params.completeness(), Completeness::Incomplete);
        assert_eq!(params.missing(), &[Field::Destination]);
        assert_eq!(params.int(Field::MaxResults), Some(3));
    }

    #[test]
    fn test_lowercase_codes_are_normalized() {
        let (extractor, _) = extractor(r#"{"airport_code": "jfk", "date": "2024-12-21"}"#);
        let request = ExtractionRequest::new("JFK on December 21", Profile::OnTimePerformance);

        let params = extractor.extract(&request).unwrap();

        assert!(params.is_complete());
        assert_eq!(params.iata(Field::AirportCode).unwrap().as_str(), "JFK");
    }

    #[test]
    fn test_unknown_airport_is_missing() {
        let (extractor, _) = extractor(r#"{"airport_code": "Unknown", "date": "2024-12-21"}"#);
        let request = ExtractionRequest::new("some airport", Profile::OnTimePerformance);

        let params = extractor.extract(&request).unwrap();

        assert_eq!(params.missing(), &[Field::AirportCode]);
        assert_eq!(params.issues().len(), 1);
    }

    #[test]
    fn test_inspiration_reversed_range_is_missing() {
        let (extractor, _) = extractor(
            r#"{"origin": "BOM", "departure_date_range": "2025-06-15,2025-06-01", "one_way": false}"#,
        );
        let request = ExtractionRequest::new("cheap trips from Mumbai in June", Profile::InspirationSearch);

        let params = extractor.extract(&request).unwrap();

        assert_eq!(params.missing(), &[Field::DepartureDateRange]);
        assert_eq!(params.boolean(Field::OneWay), Some(false));
    }

    #[test]
    fn test_availability_complete() {
        let (extractor, _) = extractor(
            "```json\n{\"origin\": \"DEL\", \"destination\": \"BOM\", \"departure_date\": \"2025-01-20\", \"adults\": 2}\n```",
        );
        let request = ExtractionRequest::new("2 seats Delhi to Mumbai Jan 20", Profile::AvailabilitySearch);

        let params = extractor.extract(&request).unwrap();

        assert!(params.is_complete());
        assert_eq!(params.int(Field::Adults), Some(2));
        assert!(!params.is_defaulted(Field::Adults));
    }

    #[test]
    fn test_reextraction_returns_fresh_result() {
        let (extractor, llm) = extractor(r#"{"airport_code": "LHR", "date": "2025-05-01"}"#);
        let request = ExtractionRequest::new("Heathrow May 1", Profile::OnTimePerformance);

        let first = extractor.extract(&request).unwrap();
        let second = extractor.extract(&request).unwrap();

        assert_eq!(first, second);
        assert_eq!(llm.call_count(), 2);
    }

    fn arb_code() -> impl Strategy<Value = String> {
        "[A-Za-z]{3}"
    }

    fn arb_date() -> impl Strategy<Value = NaiveDate> {
        (2024i32..2030, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn arb_profile() -> impl Strategy<Value = Profile> {
        prop::sample::select(Profile::ALL.to_vec())
    }

    /// A well-formed raw value for `format`
    fn sample(format: FieldFormat, code: &str, date: NaiveDate) -> serde_json::Value {
        match format {
            FieldFormat::Iata => code.into(),
            FieldFormat::Date => date.format("%Y-%m-%d").to_string().into(),
            FieldFormat::DateRange => {
                let end = date + chrono::Duration::days(9);
                format!("{},{}", date.format("%Y-%m-%d"), end.format("%Y-%m-%d")).into()
            }
            FieldFormat::Boolean => true.into(),
            FieldFormat::PositiveInt { .. } => 2.into(),
            FieldFormat::TravelClass => "BUSINESS".into(),
        }
    }

    proptest! {
        #[test]
        fn prop_all_mandatory_fields_gives_complete(
            profile in arb_profile(),
            code in arb_code(),
            date in arb_date(),
        ) {
            let mut record = serde_json::Map::new();
            for spec in profile.fields().iter().filter(|spec| spec.mandatory) {
                record.insert(spec.field.key().to_string(), sample(spec.format, &code, date));
            }
            let reply = serde_json::Value::Object(record).to_string();
            let (extractor, _) = extractor(&reply);
            let request = ExtractionRequest::new("trip", profile);

            let params = extractor.extract(&request).unwrap();

            prop_assert!(params.is_complete());
            prop_assert!(params.issues().is_empty());
            for spec in profile.fields().iter().filter(|spec| spec.mandatory) {
                let expected = match spec.format {
                    FieldFormat::Iata => serde_json::Value::from(code.to_ascii_uppercase()),
                    format => sample(format, &code, date),
                };
                prop_assert_eq!(params.get(spec.field).map(|v| v.to_json()), Some(expected));
            }
        }

        #[test]
        fn prop_missing_set_matches_dropped_fields(
            profile in arb_profile(),
            keep in prop::collection::vec(any::<bool>(), 7),
        ) {
            let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
            let mut record = serde_json::Map::new();
            let mut expected = Vec::new();
            for (spec, keep) in profile.fields().iter().filter(|spec| spec.mandatory).zip(&keep) {
                if *keep {
                    record.insert(spec.field.key().to_string(), sample(spec.format, "CDG", date));
                } else {
                    expected.push(spec.field);
                }
            }
            let reply = serde_json::Value::Object(record).to_string();
            let (extractor, _) = extractor(&reply);
            let request = ExtractionRequest::new("trip", profile);

            let params = extractor.extract(&request).unwrap();

            prop_assert_eq!(params.missing(), expected.as_slice());
            prop_assert_eq!(params.is_complete(), expected.is_empty());
            if profile.spec(Field::Adults).is_some() {
                prop_assert_eq!(params.int(Field::Adults), Some(1));
            }
            if profile.spec(Field::MaxResults).is_some() {
                prop_assert_eq!(params.int(Field::MaxResults), Some(3));
            }
            if profile.spec(Field::TravelClass).is_some() {
                prop_assert_eq!(params.travel_class(Field::TravelClass), Some(TravelClass::Economy));
            }
        }

        #[test]
        fn prop_arbitrary_reply_never_panics(reply in "\\PC{0,64}") {
            let (extractor, _) = extractor(&reply);
            let request = ExtractionRequest::new("trip", Profile::InspirationSearch);

            match extractor.extract(&request) {
                Ok(params) => prop_assert_eq!(params.profile(), Profile::InspirationSearch),
                Err(failure) => prop_assert!(!failure.fallback.is_complete()),
            }
        }
    }
}
