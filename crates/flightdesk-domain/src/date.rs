//! ISO-8601 dates and date ranges

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parse a strict `YYYY-MM-DD` calendar date
///
/// The shape is checked before calendar validity so that unpadded forms
/// such as `2025-3-4` are rejected even though chrono would accept them.
///
/// # Examples
///
/// ```
/// use flightdesk_domain::parse_iso_date;
///
/// assert!(parse_iso_date("2025-03-14").is_ok());
/// assert!(parse_iso_date("2025-3-14").is_err());
/// assert!(parse_iso_date("2025-02-30").is_err());
/// ```
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, String> {
    let bytes = value.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    if !shape_ok {
        return Err(format!("Invalid date '{}': expected YYYY-MM-DD", value));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", value, e))
}

/// Inclusive departure date range, written `YYYY-MM-DD,YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range from two dates
    ///
    /// # Errors
    /// Returns error if `start` is after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if start > end {
            return Err(format!(
                "Invalid date range: {} is after {}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ));
        }
        Ok(Self { start, end })
    }

    /// Parse the comma-separated form
    pub fn parse(value: &str) -> Result<Self, String> {
        let (first, second) = value
            .split_once(',')
            .ok_or_else(|| format!("Invalid date range '{}': expected YYYY-MM-DD,YYYY-MM-DD", value))?;

        Self::new(parse_iso_date(first)?, parse_iso_date(second)?)
    }

    /// First day of the range
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered, both ends included
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

impl std::str::FromStr for DateRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DateRange {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DateRange> for String {
    fn from(range: DateRange) -> Self {
        range.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_valid_date() {
        let date = parse_iso_date("2025-03-14").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(parse_iso_date("").is_err());
        assert!(parse_iso_date("2025/03/14").is_err());
        assert!(parse_iso_date("14-03-2025").is_err());
        assert!(parse_iso_date("2025-3-14").is_err());
        assert!(parse_iso_date("2025-03-14T10:00").is_err());
        assert!(parse_iso_date(" 2025-03-14").is_err());
        assert!(parse_iso_date("next friday").is_err());
    }

    #[test]
    fn test_rejects_impossible_dates() {
        assert!(parse_iso_date("2025-02-29").is_err());
        assert!(parse_iso_date("2025-13-01").is_err());
        assert!(parse_iso_date("2025-00-10").is_err());
        assert!(parse_iso_date("2024-02-29").is_ok());
    }

    #[test]
    fn test_range_parse() {
        let range = DateRange::parse("2025-02-01,2025-02-10").unwrap();
        assert_eq!(range.start(), NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(range.end(), NaiveDate::from_ymd_opt(2025, 2, 10).unwrap());
        assert_eq!(range.days(), 10);
        assert_eq!(range.to_string(), "2025-02-01,2025-02-10");
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::parse("2025-02-01,2025-02-01").unwrap();
        assert_eq!(range.days(), 1);
    }

    #[test]
    fn test_range_rejects_reversed() {
        assert!(DateRange::parse("2025-02-10,2025-02-01").is_err());
    }

    #[test]
    fn test_range_rejects_bad_forms() {
        assert!(DateRange::parse("2025-02-01").is_err());
        assert!(DateRange::parse("2025-02-01, 2025-02-10").is_err());
        assert!(DateRange::parse("2025-02-01;2025-02-10").is_err());
        assert!(DateRange::parse("2025-02-01,2025-02-10,2025-02-12").is_err());
    }

    proptest! {
        #[test]
        fn prop_valid_ranges_accepted(
            y in 2000i32..2100,
            m in 1u32..=12,
            d in 1u32..=28,
            span in 0i64..60,
        ) {
            let start = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            let end = start + chrono::Duration::days(span);
            let text = format!("{},{}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"));
            let range = DateRange::parse(&text).unwrap();
            prop_assert_eq!(range.to_string(), text);
        }

        #[test]
        fn prop_reversed_ranges_rejected(
            y in 2000i32..2100,
            m in 1u32..=12,
            d in 1u32..=28,
            span in 1i64..60,
        ) {
            let start = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            let end = start + chrono::Duration::days(span);
            let text = format!("{},{}", end.format("%Y-%m-%d"), start.format("%Y-%m-%d"));
            prop_assert!(DateRange::parse(&text).is_err());
        }

        #[test]
        fn prop_date_format_round_trips(y in 1000i32..9999, m in 1u32..=12, d in 1u32..=28) {
            let text = format!("{:04}-{:02}-{:02}", y, m, d);
            let date = parse_iso_date(&text).unwrap();
            prop_assert_eq!(date.format("%Y-%m-%d").to_string(), text);
        }
    }
}
