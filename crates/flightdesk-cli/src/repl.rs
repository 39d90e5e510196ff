//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! Every line that is not a REPL command is treated as a query for the
//! active profile. Incomplete extractions list what is missing and wait for
//! the next line.

use crate::commands::{build_extractor, connect_provider, from_query, run_search};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use flightdesk_domain::traits::LlmProvider;
use flightdesk_domain::Profile;
use flightdesk_extractor::QueryExtractor;
use flightdesk_provider::FlightDataProvider;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing::debug;

/// Run the interactive REPL.
pub fn run_repl(config: &Config, formatter: &Formatter, profile: Profile) -> Result<()> {
    // Both collaborators are needed for every query; fail before the first prompt.
    let extractor = build_extractor(config)?;
    let mut provider = connect_provider(config)?;

    println!(
        "{}",
        formatter.info("Flightdesk REPL - Type 'help' for commands, 'exit' to quit")
    );
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(|e| CliError::Config(format!("Invalid history size: {}", e)))?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(|e| {
        CliError::Io(std::io::Error::other(format!(
            "Failed to initialize editor: {}",
            e
        )))
    })?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut profile = profile;

    loop {
        let prompt = format!("flightdesk ({})> ", profile);

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(ReplCommand::Profile(next)) => {
                        profile = next;
                        println!("{}", formatter.success(&format!("Profile set to {}", profile)));
                    }
                    Ok(ReplCommand::Query(query)) => {
                        println!(
                            "{}",
                            process_query(&query, profile, &extractor, &mut provider, formatter)
                        );
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    provider.disconnect();
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplCommand {
    /// Leave the REPL
    Exit,
    /// Show help
    Help,
    /// Switch the active profile
    Profile(Profile),
    /// Extract and search
    Query(String),
}

/// Parse a REPL command line.
pub fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    match parts.as_slice() {
        [] => Err(CliError::InvalidInput("Empty command".to_string())),
        ["exit" | "quit" | "q"] => Ok(ReplCommand::Exit),
        ["help" | "?"] => Ok(ReplCommand::Help),
        ["profile", name] => Profile::parse(name).map(ReplCommand::Profile).ok_or_else(|| {
            CliError::InvalidInput(format!(
                "Unknown profile: {}. Use offers, availability, inspiration or on-time.",
                name
            ))
        }),
        ["profile", ..] => Err(CliError::InvalidInput(
            "Usage: profile <offers|availability|inspiration|on-time>".to_string(),
        )),
        _ => Ok(ReplCommand::Query(line.to_string())),
    }
}

/// Extract parameters from one query and, when complete, run the search.
///
/// Always returns something to print; errors become error lines.
pub fn process_query<L, P>(
    query: &str,
    profile: Profile,
    extractor: &QueryExtractor<L>,
    provider: &mut P,
    formatter: &Formatter,
) -> String
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
    P: FlightDataProvider,
{
    let params = match from_query(extractor, query, profile) {
        Ok(params) => params,
        Err(e) => return formatter.error(&e.to_string()),
    };

    if !params.is_complete() {
        debug!("Incomplete extraction, missing {:?}", params.missing());
        return format!(
            "{}\n{}",
            formatter.missing_fields(params.missing()),
            formatter.info("Please try again with the missing details.")
        );
    }

    match run_search(&params, provider, formatter) {
        Ok(output) => output,
        Err(e) => formatter.error(&e.to_string()),
    }
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  <query>                        - Extract parameters and search");
    println!("    e.g. flights from Paris to Tokyo next Friday");
    println!("  profile <name>                 - Switch search");
    println!("    name: offers|availability|inspiration|on-time");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
}
