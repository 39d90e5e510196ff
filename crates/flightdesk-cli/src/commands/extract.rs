//! Extract command implementation.

use crate::error::Result;
use crate::output::Formatter;
use flightdesk_domain::traits::LlmProvider;
use flightdesk_domain::Profile;
use flightdesk_extractor::QueryExtractor;

use super::resolve::from_query;

/// Execute the extract command: print the parameters without searching.
pub fn execute_extract<L>(
    extractor: &QueryExtractor<L>,
    query: &str,
    profile: Profile,
    formatter: &Formatter,
) -> Result<String>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    let params = from_query(extractor, query, profile)?;
    formatter.format_parameters(&params)
}
