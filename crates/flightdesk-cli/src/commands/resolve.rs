//! Turning user input into search parameters.

use crate::config::{
    require_env, Config, AMADEUS_API_KEY_VAR, AMADEUS_SECRET_VAR, OPENAI_API_KEY_VAR,
};
use crate::error::{CliError, Result};
use flightdesk_domain::traits::LlmProvider;
use flightdesk_domain::Profile;
use flightdesk_extractor::{
    validate_record, ExtractedParameters, ExtractionRequest, ExtractorConfig, QueryExtractor,
};
use flightdesk_llm::OpenAiProvider;
use flightdesk_provider::AmadeusClient;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Build an extractor backed by OpenAI, reading the key from the environment.
pub fn build_extractor(config: &Config) -> Result<QueryExtractor<OpenAiProvider>> {
    let api_key = require_env(OPENAI_API_KEY_VAR)?;
    let llm = OpenAiProvider::new(api_key, config.oracle.clone())?;

    QueryExtractor::new(llm, config.extractor.clone())
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Read the provider key and secret from the environment.
pub fn provider_credentials() -> Result<(String, String)> {
    Ok((require_env(AMADEUS_API_KEY_VAR)?, require_env(AMADEUS_SECRET_VAR)?))
}

/// Build and connect a provider client, reading credentials from the environment.
pub fn connect_provider(config: &Config) -> Result<AmadeusClient> {
    let (api_key, api_secret) = provider_credentials()?;

    let mut client = AmadeusClient::new(api_key, api_secret, config.provider.clone())?;
    client.connect()?;
    Ok(client)
}

/// Extract parameters from a free-text query.
///
/// Only a failed extraction is an error; incomplete results are returned.
pub fn from_query<L>(
    extractor: &QueryExtractor<L>,
    query: &str,
    profile: Profile,
) -> Result<ExtractedParameters>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    extractor
        .extract(&ExtractionRequest::new(query, profile))
        .map_err(|failure| {
            warn!("Extraction failed: {}", failure.reason());
            CliError::from(failure)
        })
}

/// Validate explicitly supplied flags the same way model output is validated.
pub fn from_flags(
    profile: Profile,
    record: &Map<String, Value>,
    config: &ExtractorConfig,
) -> ExtractedParameters {
    debug!("Validating {} flag(s) for {}", record.len(), profile);
    validate_record(profile, record, config)
}

/// Reject parameters that lack a mandatory field.
pub fn require_complete(params: ExtractedParameters) -> Result<ExtractedParameters> {
    if params.is_complete() {
        Ok(params)
    } else {
        Err(CliError::Incomplete(params.missing().to_vec()))
    }
}

/// Overlay explicit flags on extracted parameters and validate the result.
///
/// Defaulted values are dropped first so a default never shadows a flag
/// and the merged parameters report their own defaults.
pub fn with_flags(
    params: &ExtractedParameters,
    flags: &Map<String, Value>,
    config: &ExtractorConfig,
) -> ExtractedParameters {
    if flags.is_empty() {
        return params.clone();
    }

    let mut record: Map<String, Value> = params
        .values()
        .filter(|(field, _)| !params.is_defaulted(*field))
        .map(|(field, value)| (field.key().to_string(), value.to_json()))
        .collect();
    for (key, value) in flags {
        debug!("Flag overrides extracted '{}'", key);
        record.insert(key.clone(), value.clone());
    }

    validate_record(params.profile(), &record, config)
}

/// Resolve complete parameters from a query when given, else from flags.
///
/// With a query, any flags passed alongside it take precedence over what
/// was extracted.
pub fn resolve(
    query: Option<&str>,
    record: Map<String, Value>,
    profile: Profile,
    config: &Config,
) -> Result<ExtractedParameters> {
    let params = match query {
        Some(query) => {
            let extracted = from_query(&build_extractor(config)?, query, profile)?;
            with_flags(&extracted, &record, &config.extractor)
        }
        None => from_flags(profile, &record, &config.extractor),
    };

    require_complete(params)
}
