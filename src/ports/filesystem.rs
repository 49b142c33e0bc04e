//! Filesystem port for file I/O operations.

use std::path::Path;

/// Provides filesystem access for writing output.
///
/// Abstracting the filesystem allows tests to inject failures without
/// relying on permissions of the real disk.
pub trait FileSystem: Send + Sync {
    /// Writes the given contents to a file, creating or overwriting it.
    ///
    /// Parent directories are never created.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (missing directory, permissions,
    /// disk full, etc.).
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Creates a directory and all of its missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if any component cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
