//! Flightdesk CLI - flight searches from plain-language queries.

use clap::Parser;
use flightdesk_cli::commands;
use flightdesk_cli::repl;
use flightdesk_cli::{Cli, CliError, Command, Config, Formatter};
use flightdesk_domain::Profile;
use flightdesk_provider::AmadeusClient;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> flightdesk_cli::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(Path::new(path))?,
        None => Config::load()?,
    };

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    // Searches need the provider; fail before spending an LLM call.
    if matches!(
        cli.command,
        Command::Offers(_) | Command::Availability(_) | Command::Inspire(_) | Command::OnTime(_)
    ) {
        commands::provider_credentials()?;
    }

    let output = match cli.command {
        Command::Offers(args) => {
            let params = resolve(
                args.query.as_deref(),
                args.to_record(),
                Profile::OfferSearch,
                &config,
                &formatter,
            )?;
            with_provider(&config, |provider| {
                commands::execute_offers(&params, provider, &formatter)
            })?
        }
        Command::Availability(args) => {
            let params = resolve(
                args.query.as_deref(),
                args.to_record(),
                Profile::AvailabilitySearch,
                &config,
                &formatter,
            )?;
            with_provider(&config, |provider| {
                commands::execute_availability(&params, provider, &formatter)
            })?
        }
        Command::Inspire(args) => {
            let params = resolve(
                args.query.as_deref(),
                args.to_record(),
                Profile::InspirationSearch,
                &config,
                &formatter,
            )?;
            with_provider(&config, |provider| {
                commands::execute_inspire(&params, args.follow_links, provider, &formatter)
            })?
        }
        Command::OnTime(args) => {
            let params = resolve(
                args.query.as_deref(),
                args.to_record(),
                Profile::OnTimePerformance,
                &config,
                &formatter,
            )?;
            with_provider(&config, |provider| {
                commands::execute_on_time(&params, provider, &formatter)
            })?
        }
        Command::Extract(args) => {
            let extractor = commands::build_extractor(&config)?;
            commands::execute_extract(
                &extractor,
                &args.text.join(" "),
                args.profile.into(),
                &formatter,
            )?
        }
        Command::Repl(args) => {
            repl::run_repl(&config, &formatter, args.profile.into())?;
            return Ok(());
        }
    };

    println!("{}", output);
    Ok(())
}

/// Resolve parameters, listing the missing fields before failing.
fn resolve(
    query: Option<&str>,
    record: serde_json::Map<String, serde_json::Value>,
    profile: Profile,
    config: &Config,
    formatter: &Formatter,
) -> flightdesk_cli::Result<flightdesk_extractor::ExtractedParameters> {
    commands::resolve(query, record, profile, config).inspect_err(|e| {
        if let CliError::Incomplete(fields) = e {
            eprintln!("{}", formatter.missing_fields(fields));
        }
    })
}

/// Connect, run one search, and disconnect whatever the outcome.
fn with_provider<F>(config: &Config, search: F) -> flightdesk_cli::Result<String>
where
    F: FnOnce(&mut AmadeusClient) -> flightdesk_cli::Result<String>,
{
    let mut provider = commands::connect_provider(config)?;
    let result = search(&mut provider);
    provider.disconnect();
    result
}
