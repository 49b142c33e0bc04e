//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::{JiraIssueTracker, LiveClock, LiveFileSystem};
use crate::adapters::recording::RecordingIssueTracker;
use crate::adapters::replaying::ReplayingIssueTracker;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::Config;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::issues::IssueTracker;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording).
pub struct ServiceContext {
    /// Clock for naming the run directory.
    pub clock: Box<dyn Clock>,
    /// Filesystem for output.
    pub fs: Box<dyn FileSystem>,
    /// Issue tracker issues are fetched from.
    pub issues: Box<dyn IssueTracker>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(
        clock: Box<dyn Clock>,
        fs: Box<dyn FileSystem>,
        issues: Box<dyn IssueTracker>,
    ) -> Self {
        Self { clock, fs, issues }
    }

    /// Creates a live context talking to the Jira instance at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the Jira client cannot be built.
    pub fn live(url: &str, config: &Config) -> Result<Self, String> {
        let tracker = JiraIssueTracker::new(url, &config.user_email, &config.api_token)
            .map_err(|e| e.to_string())?;
        Ok(Self::new(Box::new(LiveClock), Box::new(LiveFileSystem), Box::new(tracker)))
    }

    /// Creates a live context whose tracker traffic is recorded to `cassette`.
    ///
    /// Returns the context and the shared recorder. Drop the context, then
    /// pass the recorder to [`finish_recording`] to write the cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if the Jira client cannot be built.
    pub fn recording(
        url: &str,
        config: &Config,
        cassette: &Path,
    ) -> Result<(Self, Arc<Mutex<CassetteRecorder>>), String> {
        let tracker = JiraIssueTracker::new(url, &config.user_email, &config.api_token)
            .map_err(|e| e.to_string())?;
        let name = cassette
            .file_stem()
            .map_or_else(|| "sigrab-session".to_string(), |s| s.to_string_lossy().into_owned());
        let recorder =
            Arc::new(Mutex::new(CassetteRecorder::new(cassette, name, tracker.base_url())));

        let ctx = Self::new(
            Box::new(LiveClock),
            Box::new(LiveFileSystem),
            Box::new(RecordingIssueTracker::new(Box::new(tracker), Arc::clone(&recorder))),
        );
        Ok((ctx, recorder))
    }

    /// Creates a context whose tracker replays a recorded cassette.
    ///
    /// Clock and filesystem stay live; no network access or credentials
    /// are needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(cassette: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(cassette)?;
        Ok(Self::new(
            Box::new(LiveClock),
            Box::new(LiveFileSystem),
            Box::new(ReplayingIssueTracker::new(CassetteReplayer::new(&cassette))),
        ))
    }
}

/// Writes the cassette held by `recorder` and returns its path.
///
/// Every context sharing the recorder must have been dropped first.
///
/// # Errors
///
/// Returns an error if the recorder is still shared, its lock is poisoned,
/// or the cassette cannot be written.
pub fn finish_recording(recorder: Arc<Mutex<CassetteRecorder>>) -> Result<PathBuf, String> {
    let recorder = Arc::try_unwrap(recorder)
        .map_err(|_| "cassette recorder is still in use".to_string())?
        .into_inner()
        .map_err(|_| "cassette recorder lock poisoned".to_string())?;
    let path = recorder.path().to_path_buf();
    tracing::debug!(path = %path.display(), interactions = recorder.len(), "writing cassette");
    recorder.finish().map_err(|e| format!("failed to write cassette {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
    use chrono::Utc;
    use serde_json::json;

    fn config() -> Config {
        Config { api_token: "token".into(), user_email: "user@example.com".into() }
    }

    #[test]
    fn replaying_context_serves_cassette() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.cassette.yaml");
        let cassette = Cassette {
            name: "run".into(),
            recorded_at: Utc::now(),
            base_url: "https://acme.atlassian.net".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "issues".into(),
                method: "get_issue".into(),
                input: json!({"key": "PROJ-1"}),
                output: json!({"Ok": {"key": "PROJ-1", "fields": {"summary": "first"}}}),
            }],
        };
        std::fs::write(&path, serde_yaml::to_string(&cassette).unwrap()).unwrap();

        let ctx = ServiceContext::replaying(&path).unwrap();
        assert_eq!(ctx.issues.get_issue("PROJ-1").unwrap().summary(), Some("first"));
    }

    #[test]
    fn replaying_missing_cassette_is_an_error() {
        let err = ServiceContext::replaying(Path::new("/nonexistent/run.cassette.yaml"))
            .err()
            .unwrap();
        assert!(err.contains("Failed to read cassette file"));
    }

    #[test]
    fn live_context_rejects_bad_url() {
        let err = ServiceContext::live("not a url", &config()).err().unwrap();
        assert!(err.contains("invalid Jira URL"));
    }

    #[test]
    fn finish_recording_writes_cassette() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.cassette.yaml");

        let (ctx, recorder) =
            ServiceContext::recording("https://acme.atlassian.net/", &config(), &path).unwrap();
        drop(ctx);
        assert_eq!(finish_recording(recorder).unwrap(), path);

        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.name, "empty.cassette");
        assert_eq!(cassette.base_url, "https://acme.atlassian.net");
        assert!(cassette.interactions.is_empty());
    }

    #[test]
    fn finish_recording_reports_unwritable_cassette() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/run.cassette.yaml");

        let (ctx, recorder) =
            ServiceContext::recording("https://acme.atlassian.net", &config(), &path).unwrap();
        drop(ctx);
        let err = finish_recording(recorder).unwrap_err();
        assert!(err.starts_with("failed to write cassette"), "{err}");
    }

    #[test]
    fn finish_recording_requires_context_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.cassette.yaml");

        let (_ctx, recorder) =
            ServiceContext::recording("https://acme.atlassian.net", &config(), &path).unwrap();
        let err = finish_recording(recorder).unwrap_err();
        assert!(err.contains("still in use"), "{err}");
        assert!(!path.exists());
    }
}
