//! Request and result types for extraction

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use chrono::NaiveDate;
use flightdesk_domain::{DateRange, Field, IataCode, Profile, TravelClass};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Request to extract search parameters from a free-text query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    query: String,
    profile: Profile,
}

impl ExtractionRequest {
    /// Create a request for the given profile
    pub fn new(query: impl Into<String>, profile: Profile) -> Self {
        Self {
            query: query.into(),
            profile,
        }
    }

    /// The user's raw query text
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Which search the parameters are for
    pub fn profile(&self) -> Profile {
        self.profile
    }
}

/// A validated value for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Airport or city code
    Iata(IataCode),
    /// Calendar date
    Date(NaiveDate),
    /// Inclusive date range
    DateRange(DateRange),
    /// Yes / no
    Boolean(bool),
    /// Positive integer
    Int(u32),
    /// Cabin class
    TravelClass(TravelClass),
}

impl FieldValue {
    /// JSON rendering, using the same textual forms the model is asked for
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Iata(code) => Value::String(code.to_string()),
            FieldValue::Date(date) => Value::String(date.format("%Y-%m-%d").to_string()),
            FieldValue::DateRange(range) => Value::String(range.to_string()),
            FieldValue::Boolean(b) => Value::Bool(*b),
            FieldValue::Int(n) => Value::from(*n),
            FieldValue::TravelClass(class) => Value::String(class.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Iata(code) => write!(f, "{}", code),
            FieldValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            FieldValue::DateRange(range) => write!(f, "{}", range),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::TravelClass(class) => write!(f, "{}", class),
        }
    }
}

/// Whether every mandatory field was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completeness {
    /// All mandatory fields present and well-formed
    Complete,
    /// At least one mandatory field missing or malformed
    Incomplete,
}

/// A field the model supplied but that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// The rejected field
    pub field: Field,
    /// Why it was rejected
    pub reason: String,
}

/// Structured parameters for one profile
///
/// Built once by the extractor (or by [`crate::validate_record`]) and never
/// mutated; extracting again produces a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedParameters {
    profile: Profile,
    values: BTreeMap<Field, FieldValue>,
    defaulted: Vec<Field>,
    missing: Vec<Field>,
    issues: Vec<FieldIssue>,
}

impl ExtractedParameters {
    /// Assemble parameters from validated values, filling defaults and
    /// computing the missing mandatory set in profile order
    pub(crate) fn assemble(
        profile: Profile,
        mut values: BTreeMap<Field, FieldValue>,
        issues: Vec<FieldIssue>,
        config: &ExtractorConfig,
    ) -> Self {
        let mut defaulted = Vec::new();
        let mut missing = Vec::new();

        for spec in profile.fields() {
            if values.contains_key(&spec.field) {
                continue;
            }
            if spec.mandatory {
                missing.push(spec.field);
            } else if let Some(default) = default_value(spec.field, config) {
                values.insert(spec.field, default);
                defaulted.push(spec.field);
            }
        }

        Self {
            profile,
            values,
            defaulted,
            missing,
            issues,
        }
    }

    /// Parameters holding only the profile's safe defaults
    ///
    /// Every mandatory field is unset and reported missing.
    pub fn defaults(profile: Profile, config: &ExtractorConfig) -> Self {
        Self::assemble(profile, BTreeMap::new(), Vec::new(), config)
    }

    /// Profile these parameters were extracted for
    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Complete or incomplete
    pub fn completeness(&self) -> Completeness {
        if self.missing.is_empty() {
            Completeness::Complete
        } else {
            Completeness::Incomplete
        }
    }

    /// Shorthand for `completeness() == Complete`
    pub fn is_complete(&self) -> bool {
        self.completeness() == Completeness::Complete
    }

    /// Mandatory fields absent after validation, in profile order
    pub fn missing(&self) -> &[Field] {
        &self.missing
    }

    /// Optional fields that took their default value
    pub fn defaulted(&self) -> &[Field] {
        &self.defaulted
    }

    /// Fields that were supplied but rejected
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Whether the field's value came from a default
    pub fn is_defaulted(&self, field: Field) -> bool {
        self.defaulted.contains(&field)
    }

    /// Raw access to a field value
    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    /// All present values in field order
    pub fn values(&self) -> impl Iterator<Item = (Field, &FieldValue)> {
        self.values.iter().map(|(field, value)| (*field, value))
    }

    /// IATA code stored under `field`
    pub fn iata(&self, field: Field) -> Option<&IataCode> {
        match self.values.get(&field) {
            Some(FieldValue::Iata(code)) => Some(code),
            _ => None,
        }
    }

    /// Date stored under `field`
    pub fn date(&self, field: Field) -> Option<NaiveDate> {
        match self.values.get(&field) {
            Some(FieldValue::Date(date)) => Some(*date),
            _ => None,
        }
    }

    /// Date range stored under `field`
    pub fn date_range(&self, field: Field) -> Option<DateRange> {
        match self.values.get(&field) {
            Some(FieldValue::DateRange(range)) => Some(*range),
            _ => None,
        }
    }

    /// Boolean stored under `field`
    pub fn boolean(&self, field: Field) -> Option<bool> {
        match self.values.get(&field) {
            Some(FieldValue::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    /// Integer stored under `field`
    pub fn int(&self, field: Field) -> Option<u32> {
        match self.values.get(&field) {
            Some(FieldValue::Int(n)) => Some(*n),
            _ => None,
        }
    }

    /// Travel class stored under `field`
    pub fn travel_class(&self, field: Field) -> Option<TravelClass> {
        match self.values.get(&field) {
            Some(FieldValue::TravelClass(class)) => Some(*class),
            _ => None,
        }
    }

    /// JSON object with every profile field; unset fields are `null`
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for spec in self.profile.fields() {
            let value = self
                .values
                .get(&spec.field)
                .map(FieldValue::to_json)
                .unwrap_or(Value::Null);
            map.insert(spec.field.key().to_string(), value);
        }
        Value::Object(map)
    }
}

fn default_value(field: Field, config: &ExtractorConfig) -> Option<FieldValue> {
    match field {
        Field::TravelClass => Some(FieldValue::TravelClass(config.default_travel_class)),
        Field::Adults => Some(FieldValue::Int(config.default_adults)),
        Field::MaxResults => Some(FieldValue::Int(config.default_max_results)),
        _ => None,
    }
}

/// Extraction could not produce a structured result
///
/// Carries the cause and the profile's safe defaults so callers can
/// re-prompt or abort without special-casing.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Extraction failed: {error}")]
pub struct ExtractionFailure {
    /// What went wrong
    pub error: ExtractorError,

    /// Defaults for the requested profile, all mandatory fields missing
    pub fallback: ExtractedParameters,
}

impl ExtractionFailure {
    /// Human-readable cause
    pub fn reason(&self) -> String {
        self.error.to_string()
    }
}
