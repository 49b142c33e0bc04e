//! Replaying adapter for the `IssueTracker` port.

use std::sync::Mutex;

use super::{next_interaction, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{Issue, IssueTracker};

/// Serves recorded issue tracker results from a cassette.
pub struct ReplayingIssueTracker {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingIssueTracker {
    /// Create a replaying issue tracker backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl IssueTracker for ReplayingIssueTracker {
    /// # Panics
    ///
    /// Panics if the next recorded call was for a different key.
    fn get_issue(&self, key: &str) -> Result<Issue, Box<dyn std::error::Error + Send + Sync>> {
        let interaction = next_interaction(&self.replayer, "issues", "get_issue");
        let recorded = interaction.input.get("key").and_then(serde_json::Value::as_str);
        assert!(
            recorded == Some(key),
            "Cassette mismatch: get_issue({key:?}) requested but seq={} recorded key {}",
            interaction.seq,
            recorded.map_or_else(|| "<none>".to_string(), |k| format!("{k:?}")),
        );
        replay_result(interaction.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn tracker(calls: Vec<(&str, serde_json::Value)>) -> ReplayingIssueTracker {
        let interactions = calls
            .into_iter()
            .zip(0..)
            .map(|((key, output), seq)| Interaction {
                seq,
                port: "issues".into(),
                method: "get_issue".into(),
                input: json!({"key": key}),
                output,
            })
            .collect();
        let cassette = Cassette {
            name: "t".into(),
            recorded_at: Utc::now(),
            base_url: "http://x".into(),
            interactions,
        };
        ReplayingIssueTracker::new(CassetteReplayer::new(&cassette))
    }

    #[test]
    fn replays_recorded_results_in_order() {
        let tracker = tracker(vec![
            ("P-2", json!({"Ok": {"key": "P-2", "fields": {"summary": "two"}}})),
            ("P-1", json!({"Err": "Jira API error (404) for P-1: Issue does not exist"})),
        ]);

        let first = tracker.get_issue("P-2").unwrap();
        assert_eq!(first.key, "P-2");
        assert_eq!(first.summary(), Some("two"));

        let second = tracker.get_issue("P-1").unwrap_err();
        assert!(second.to_string().contains("404"));
    }

    #[test]
    #[should_panic(expected = "Cassette exhausted")]
    fn panics_past_the_end() {
        let tracker = tracker(vec![]);
        let _ = tracker.get_issue("P-1");
    }

    #[test]
    #[should_panic(expected = "Cassette mismatch: get_issue(\"P-2\") requested but seq=0 recorded key \"P-3\"")]
    fn panics_when_requested_key_differs() {
        let tracker = tracker(vec![("P-3", json!({"Ok": {"key": "P-3"}}))]);
        let _ = tracker.get_issue("P-2");
    }
}
