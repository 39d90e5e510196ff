//! Parse LLM output into a JSON record

use crate::error::ExtractorError;
use serde_json::{Map, Value};

/// Parse the model's reply as exactly one JSON object
///
/// The reply is treated as data only. Anything that is not a single
/// well-formed object (arrays, scalars, trailing prose, Python-style
/// literals) is rejected.
pub fn parse_llm_response(response: &str) -> Result<Map<String, Value>, ExtractorError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(json_str)?;

    match json {
        Value::Object(map) => Ok(map),
        other => Err(ExtractorError::InvalidFormat(format!(
            "Expected JSON object, got {}",
            kind_of(&other)
        ))),
    }
}

/// Extract JSON from response, handling one markdown code block
fn extract_json(response: &str) -> Result<&str, ExtractorError> {
    let trimmed = response.trim();

    if trimmed.is_empty() {
        return Err(ExtractorError::InvalidFormat("Empty response".to_string()));
    }

    if let Some(rest) = trimmed.strip_prefix("```") {
        // Skip the opening fence line (```json or ```)
        let body = match rest.find('\n') {
            Some(idx) => &rest[idx + 1..],
            None => {
                return Err(ExtractorError::InvalidFormat(
                    "Empty code block".to_string(),
                ))
            }
        };
        let body = body
            .trim_end()
            .strip_suffix("```")
            .ok_or_else(|| ExtractorError::InvalidFormat("Unterminated code block".to_string()))?;

        let body = body.trim();
        if body.is_empty() {
            return Err(ExtractorError::InvalidFormat("Empty code block".to_string()));
        }
        Ok(body)
    } else {
        Ok(trimmed)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
