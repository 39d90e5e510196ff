//! Flightdesk CLI library.
//!
//! Configuration, parameter resolution, command execution and output
//! formatting for the `flightdesk` binary. Commands are generic over the
//! LLM and flight data provider so they run against mocks in tests.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
