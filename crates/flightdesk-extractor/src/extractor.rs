//! Core QueryExtractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_llm_response;
use crate::prompt::{schema_sketch, PromptBuilder};
use crate::types::{ExtractedParameters, ExtractionFailure, ExtractionRequest};
use crate::validate::validate_record;
use chrono::NaiveDate;
use flightdesk_domain::traits::LlmProvider;
use flightdesk_domain::Profile;
use tracing::{debug, info, warn};

/// Turns free-text travel queries into validated search parameters
///
/// The LLM is injected, so tests run against a mock and the CLI against
/// a real provider. One `extract` call makes at most one LLM request.
pub struct QueryExtractor<L>
where
    L: LlmProvider,
{
    llm_provider: L,
    config: ExtractorConfig,
    reference_date: Option<NaiveDate>,
}

impl<L> QueryExtractor<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    /// Create a new QueryExtractor
    ///
    /// # Errors
    /// Returns `ExtractorError::Config` if the configuration is invalid
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        Ok(Self {
            llm_provider,
            config,
            reference_date: None,
        })
    }

    /// Pin "today" for relative dates instead of reading the local clock
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// The injected LLM provider
    pub fn llm_provider(&self) -> &L {
        &self.llm_provider
    }

    /// Extract parameters for the request's profile
    ///
    /// `Ok` holds a complete or incomplete result. `Err` means no record
    /// could be obtained at all (bad query, LLM failure, unparseable
    /// reply); its `fallback` carries the profile's defaults.
    pub fn extract(
        &self,
        request: &ExtractionRequest,
    ) -> Result<ExtractedParameters, ExtractionFailure> {
        let profile = request.profile();

        self.try_extract(request)
            .map_err(|error| self.failure(profile, error))
    }

    fn try_extract(
        &self,
        request: &ExtractionRequest,
    ) -> Result<ExtractedParameters, ExtractorError> {
        let query = request.query().trim();
        let profile = request.profile();

        if query.is_empty() {
            return Err(ExtractorError::EmptyQuery);
        }
        let length = query.chars().count();
        if length > self.config.max_query_length {
            return Err(ExtractorError::QueryTooLong(
                length,
                self.config.max_query_length,
            ));
        }

        info!("Extracting {} parameters from query ({} chars)", profile, length);

        let reference_date = self
            .reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let prompt = PromptBuilder::new(query.to_string(), profile)
            .with_reference_date(reference_date)
            .build();

        debug!("Prompt length: {} chars", prompt.len());

        let response = self
            .llm_provider
            .generate_structured(&prompt, &schema_sketch(profile))
            .map_err(|e| ExtractorError::Llm(e.to_string()))?;

        debug!("LLM response length: {} chars", response.len());

        let record = parse_llm_response(&response)?;
        let params = validate_record(profile, &record, &self.config);

        if params.is_complete() {
            info!("Extraction complete for {}", profile);
        } else {
            let missing: Vec<&str> = params.missing().iter().map(|f| f.key()).collect();
            info!(
                "Extraction incomplete for {}: missing {}",
                profile,
                missing.join(", ")
            );
        }

        Ok(params)
    }

    fn failure(&self, profile: Profile, error: ExtractorError) -> ExtractionFailure {
        warn!("Extraction failed for {}: {}", profile, error);
        ExtractionFailure {
            error,
            fallback: ExtractedParameters::defaults(profile, &self.config),
        }
    }
}
