//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI parser for `sigrab`.
#[derive(Debug, Parser)]
#[command(
    name = "sigrab",
    version,
    about = "Simple issue grabber for Jira Cloud",
    long_about = "Fetches Jira issues from a Jira Cloud project, walking down from the ending \
                  key to 1, and writes each one to a JSON file in a timestamped directory."
)]
pub struct Cli {
    /// Jira Cloud URL, e.g. <https://your-domain.atlassian.net>.
    #[arg(long)]
    pub url: String,

    /// Starting Jira issue key (e.g., DEV-123). Accepted for compatibility; the walk always ends at 1.
    #[arg(long)]
    pub from: Option<String>,

    /// Ending Jira issue key (e.g., DEV-140).
    #[arg(long)]
    pub to: String,

    /// Directory under which the run directory is created, named after the current
    /// UTC time as YYYYMMDD_HHMMSS [default: /tmp/sigrab].
    #[arg(long)]
    pub path: Option<PathBuf>,
}
