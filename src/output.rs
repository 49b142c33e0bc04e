//! Writes fetched issues to `<dir>/<KEY>.json`.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::ports::{FileSystem, Issue};

/// Why an issue could not be written.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The issue could not be serialized.
    #[error("failed to marshal issue {key} to JSON: {source}")]
    Serialize {
        /// Key of the issue.
        key: String,
        /// Underlying serializer error.
        #[source]
        source: serde_json::Error,
    },
    /// The file could not be written.
    #[error("failed to write issue to file {}: {source}", path.display())]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Serializes issues as pretty-printed JSON files.
pub struct Writer<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> Writer<'a> {
    /// Creates a writer on top of the given filesystem.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// The file an issue lands in. The key is used as-is.
    #[must_use]
    pub fn issue_path(dir: &Path, issue: &Issue) -> PathBuf {
        dir.join(format!("{}.json", issue.key))
    }

    /// Writes one issue into `dir` and returns the file path.
    ///
    /// `dir` must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError`] if serialization or the file write fails.
    pub fn write_issue(&self, dir: &Path, issue: &Issue) -> Result<PathBuf, WriteError> {
        let path = Self::issue_path(dir, issue);
        let data = serde_json::to_string_pretty(issue)
            .map_err(|source| WriteError::Serialize { key: issue.key.clone(), source })?;

        self.fs.write(&path, &data).map_err(|source| WriteError::Io { path: path.clone(), source })?;
        Ok(path)
    }
}
