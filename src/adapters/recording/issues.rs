//! Recording adapter for the `IssueTracker` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{Issue, IssueTracker};

/// Records issue tracker interactions while delegating to an inner implementation.
pub struct RecordingIssueTracker {
    inner: Box<dyn IssueTracker>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingIssueTracker {
    /// Creates a new recording issue tracker wrapping the given implementation.
    pub fn new(inner: Box<dyn IssueTracker>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct GetIssueInput<'a> {
    key: &'a str,
}

impl IssueTracker for RecordingIssueTracker {
    fn get_issue(&self, key: &str) -> Result<Issue, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.get_issue(key);
        record_result(&self.recorder, "issues", "get_issue", &GetIssueInput { key }, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;
    use serde_json::json;

    struct OddOnly;

    impl IssueTracker for OddOnly {
        fn get_issue(&self, key: &str) -> Result<Issue, Box<dyn std::error::Error + Send + Sync>> {
            let n: u64 = key.rsplit('-').next().unwrap().parse().unwrap();
            if n % 2 == 1 {
                Ok(Issue::new(key, format!("summary {n}")))
            } else {
                Err(format!("{key} does not exist").into())
            }
        }
    }

    #[test]
    fn records_successes_and_failures() {
        let dir = tempfile::tempdir().unwrap();
        let cassette_path = dir.path().join("issues.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&cassette_path, "test", "http://x")));

        {
            let tracker = RecordingIssueTracker::new(Box::new(OddOnly), Arc::clone(&recorder));
            assert!(tracker.get_issue("P-2").is_err());
            assert_eq!(tracker.get_issue("P-1").unwrap().key, "P-1");
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let cassette = Cassette::load(&cassette_path).unwrap();
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[0].port, "issues");
        assert_eq!(cassette.interactions[0].method, "get_issue");
        assert_eq!(cassette.interactions[0].input, json!({"key": "P-2"}));
        assert_eq!(cassette.interactions[0].output, json!({"Err": "P-2 does not exist"}));
        assert_eq!(cassette.interactions[1].output["Ok"]["fields"]["summary"], json!("summary 1"));
    }
}
