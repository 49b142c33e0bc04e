//! Core library for the `sigrab` CLI.
//!
//! `sigrab` walks Jira issue numbers down from an ending key to 1, fetching
//! each issue and writing the ones that exist to `<dir>/<KEY>.json`.
//! Missing issues are skipped; a failed write stops the run.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod fetch;
pub mod key;
pub mod output;
pub mod paths;
pub mod ports;

use clap::error::ErrorKind;
use clap::Parser;

pub use fetch::{FetchError, Fetcher};
pub use key::{IssueKey, ParseKeyError};
pub use output::{WriteError, Writer};

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or the grab fails.
/// `--help` and `--version` print to stdout and return `Ok`.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli)
}
