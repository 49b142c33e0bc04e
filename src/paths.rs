//! Timestamped output directory setup.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::ports::{Clock, FileSystem};

/// Base directory used when none is given.
pub const DEFAULT_BASE_DIR: &str = "/tmp/sigrab";

/// `strftime` format of the per-run directory name.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// The run directory could not be created.
#[derive(Debug, Error)]
#[error("failed to create directory {}: {source}", path.display())]
pub struct InitDirError {
    /// Directory that was being created.
    pub path: PathBuf,
    /// Underlying filesystem error.
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

/// Creates `<base>/<timestamp>` and returns it. The timestamp is the
/// clock's current UTC time, not local time.
///
/// `base` falls back to [`DEFAULT_BASE_DIR`] when absent or empty.
///
/// # Errors
///
/// Returns [`InitDirError`] if the directory cannot be created.
pub fn init_dir(
    fs: &dyn FileSystem,
    clock: &dyn Clock,
    base: Option<&Path>,
) -> Result<PathBuf, InitDirError> {
    let base = base.filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new(DEFAULT_BASE_DIR));
    let path = base.join(clock.now().format(TIMESTAMP_FORMAT).to_string());

    fs.create_dir_all(&path).map_err(|source| InitDirError { path: path.clone(), source })?;
    tracing::debug!(path = %path.display(), "created output directory");
    Ok(path)
}
