//! Per-field validation of a parsed record

use crate::config::ExtractorConfig;
use crate::types::{ExtractedParameters, FieldIssue, FieldValue};
use flightdesk_domain::{parse_iso_date, DateRange, FieldFormat, IataCode, Profile, TravelClass};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Validate a JSON record against a profile's field table
///
/// Keys outside the profile are ignored. `null` counts as absent. A
/// value that fails its format check is dropped and recorded as an
/// issue, so a malformed mandatory field surfaces as missing. Optional
/// fields still unset afterwards take their configured defaults.
pub fn validate_record(
    profile: Profile,
    record: &Map<String, Value>,
    config: &ExtractorConfig,
) -> ExtractedParameters {
    let mut values = BTreeMap::new();
    let mut issues = Vec::new();

    for key in record.keys() {
        if !profile.fields().iter().any(|spec| spec.field.key() == key) {
            debug!("Ignoring unknown key '{}' for profile {}", key, profile);
        }
    }

    for spec in profile.fields() {
        let raw = match record.get(spec.field.key()) {
            None | Some(Value::Null) => continue,
            Some(raw) => raw,
        };

        match validate_field(spec.format, raw) {
            Ok(value) => {
                values.insert(spec.field, value);
            }
            Err(reason) => {
                warn!("Rejected field '{}': {}", spec.field, reason);
                issues.push(FieldIssue {
                    field: spec.field,
                    reason,
                });
            }
        }
    }

    ExtractedParameters::assemble(profile, values, issues, config)
}

/// Check one raw value against its expected format
pub fn validate_field(format: FieldFormat, raw: &Value) -> Result<FieldValue, String> {
    match format {
        FieldFormat::Iata => IataCode::normalize(expect_str(raw)?).map(FieldValue::Iata),
        FieldFormat::Date => parse_iso_date(expect_str(raw)?).map(FieldValue::Date),
        FieldFormat::DateRange => DateRange::parse(expect_str(raw)?).map(FieldValue::DateRange),
        FieldFormat::Boolean => parse_bool(raw).map(FieldValue::Boolean),
        FieldFormat::PositiveInt { max } => parse_positive_int(raw, max).map(FieldValue::Int),
        FieldFormat::TravelClass => TravelClass::parse(expect_str(raw)?)
            .map(FieldValue::TravelClass)
            .ok_or_else(|| format!("Invalid travel class: {}", raw)),
    }
}

fn expect_str(raw: &Value) -> Result<&str, String> {
    raw.as_str()
        .ok_or_else(|| format!("Expected a string, got {}", raw))
}

fn parse_bool(raw: &Value) -> Result<bool, String> {
    match raw {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" => Ok(true),
            "false" | "no" => Ok(false),
            _ => Err(format!("Invalid boolean: {}", s)),
        },
        other => Err(format!("Invalid boolean: {}", other)),
    }
}

fn parse_positive_int(raw: &Value, max: Option<u32>) -> Result<u32, String> {
    let n: u64 = match raw {
        Value::Number(num) => {
            if let Some(n) = num.as_u64() {
                n
            } else {
                match num.as_f64() {
                    Some(f) if f.fract() == 0.0 && f >= 1.0 && f <= u32::MAX as f64 => f as u64,
                    _ => return Err(format!("Expected a positive integer, got {}", num)),
                }
            }
        }
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("Expected a positive integer, got '{}'", s));
            }
            s.parse::<u64>()
                .map_err(|e| format!("Invalid integer '{}': {}", s, e))?
        }
        other => return Err(format!("Expected a positive integer, got {}", other)),
    };

    if n < 1 {
        return Err(format!("Value {} must be at least 1", n));
    }
    let upper = max.unwrap_or(u32::MAX);
    if n > u64::from(upper) {
        return Err(format!("Value {} exceeds maximum {}", n, upper));
    }

    Ok(n as u32)
}
