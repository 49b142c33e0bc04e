//! Backward walk over issue numbers: fetch each, keep what exists, write it out.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::key::{IssueKey, ParseKeyError};
use crate::output::{WriteError, Writer};
use crate::ports::{FileSystem, Issue, IssueTracker};

/// Errors that abort a fetch run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The ending key was malformed; nothing was fetched.
    #[error("failed to parse issue key {key}: {source}")]
    InvalidKey {
        /// The key as supplied.
        key: String,
        /// What was wrong with it.
        #[source]
        source: ParseKeyError,
    },
    /// An issue was fetched but could not be written. Earlier files remain on disk.
    #[error("failed to write issue {key} to directory {}: {source}", dir.display())]
    Write {
        /// Key of the issue being written.
        key: String,
        /// Output directory.
        dir: PathBuf,
        /// Underlying write failure.
        #[source]
        source: WriteError,
    },
}

/// Walks issue numbers downward from an ending key to 1.
pub struct Fetcher<'a> {
    issues: &'a dyn IssueTracker,
    writer: Writer<'a>,
}

impl<'a> Fetcher<'a> {
    /// Creates a fetcher over the given tracker and filesystem.
    #[must_use]
    pub fn new(issues: &'a dyn IssueTracker, fs: &'a dyn FileSystem) -> Self {
        Self { issues, writer: Writer::new(fs) }
    }

    /// Fetches `PREFIX-N` down to `PREFIX-1` and writes each found issue into `dir`.
    ///
    /// Issues that cannot be retrieved are skipped. The returned issues are
    /// in fetch order, i.e. descending by number.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidKey`] if `ending_key` does not parse, and
    /// [`FetchError::Write`] on the first issue that cannot be written. No
    /// partial result is returned in either case.
    pub fn fetch_backward(&self, ending_key: &str, dir: &Path) -> Result<Vec<Issue>, FetchError> {
        let end = IssueKey::parse(ending_key)
            .map_err(|source| FetchError::InvalidKey { key: ending_key.to_string(), source })?;

        let mut fetched = Vec::new();
        let mut skipped = 0_u64;
        for current in (1..=end.number).rev() {
            let key = end.with_number(current).to_string();
            let issue = match self.issues.get_issue(&key) {
                Ok(issue) => issue,
                Err(e) => {
                    tracing::debug!(%key, error = %e, "skipping issue");
                    skipped += 1;
                    continue;
                }
            };

            let path = self.writer.write_issue(dir, &issue).map_err(|source| FetchError::Write {
                key: key.clone(),
                dir: dir.to_path_buf(),
                source,
            })?;
            tracing::info!(
                %key,
                summary = issue.summary().unwrap_or_default(),
                path = %path.display(),
                "wrote issue"
            );
            fetched.push(issue);
        }

        tracing::info!(written = fetched.len(), skipped, "fetch complete");
        Ok(fetched)
    }
}
