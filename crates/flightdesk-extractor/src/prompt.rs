//! LLM prompt engineering for parameter extraction

use chrono::NaiveDate;
use flightdesk_domain::{FieldFormat, Profile};
use serde_json::{Map, Value};

/// Builds prompts for the LLM to extract one profile's fields
pub struct PromptBuilder {
    query: String,
    profile: Profile,
    reference_date: Option<NaiveDate>,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(query: String, profile: Profile) -> Self {
        Self {
            query,
            profile,
            reference_date: None,
        }
    }

    /// Date that relative phrases ("next Friday") are resolved against
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Task
        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(&format!("The user wants to {}.\n", self.profile.purpose()));
        if let Some(date) = self.reference_date {
            prompt.push_str(&format!(
                "Today's date is {}. Resolve relative dates against it.\n",
                date.format("%Y-%m-%d")
            ));
        }
        prompt.push('\n');

        // 2. The query
        prompt.push_str("User query:\n");
        prompt.push_str("---\n");
        prompt.push_str(self.query.trim());
        prompt.push_str("\n---\n\n");

        // 3. Field list with formats
        prompt.push_str("Extract and confirm the following details:\n");
        for (idx, spec) in self.profile.fields().iter().enumerate() {
            prompt.push_str(&format!(
                "{}. \"{}\" ({}): {}. Format: {}.\n",
                idx + 1,
                spec.field.key(),
                if spec.mandatory { "mandatory" } else { "optional" },
                spec.field.label(),
                spec.format.describe(),
            ));
        }
        prompt.push('\n');

        // 4. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);
        prompt.push('\n');
        prompt.push_str(&schema_sketch(self.profile));

        prompt
    }
}

/// JSON object sketch listing every key of the profile and its format
pub fn schema_sketch(profile: Profile) -> String {
    let mut map = Map::new();
    for spec in profile.fields() {
        let placeholder = match spec.format {
            FieldFormat::Boolean => "<true | false | null>".to_string(),
            FieldFormat::PositiveInt { .. } => "<integer | null>".to_string(),
            _ => format!("<{} | null>", spec.format.describe()),
        };
        map.insert(spec.field.key().to_string(), Value::String(placeholder));
    }
    serde_json::to_string_pretty(&Value::Object(map)).unwrap_or_default()
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You extract structured search parameters for a flight-data API from a traveller's request.

Rules:
- Convert city, airport and country names to the IATA code of the main airport (e.g. Paris -> CDG, Tokyo -> NRT)
- Dates must be absolute ISO dates; never copy phrases like "next week"
- Use null for anything the query does not determine; do not invent mandatory values
- Numbers are plain JSON integers, booleans are plain JSON true/false"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format: return ONLY one JSON object with exactly these keys, no markdown code blocks, no explanations:"#;
