//! Issue tracker port for retrieving work items.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An issue as returned by the tracker's REST API.
///
/// Only `key` is interpreted; every other member, `null`s included, is kept
/// as sent so the document can be written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// The human-facing key, e.g. `PROJ-12`.
    pub key: String,
    /// `id`, `self`, `fields` and any other top-level members.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Issue {
    /// Builds a minimal issue with just a key and summary.
    pub fn new(key: impl Into<String>, summary: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("summary".into(), Value::String(summary.into()));
        let mut rest = Map::new();
        rest.insert("fields".into(), Value::Object(fields));
        Self { key: key.into(), rest }
    }

    /// A member of the issue's `fields` object.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.rest.get("fields")?.get(name)
    }

    /// The one-line summary, if the tracker sent one.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.field("summary")?.as_str()
    }
}

/// Retrieves issues from an external tracker.
///
/// Abstracting issue retrieval allows deterministic replay and testing
/// without touching a real tracker API.
pub trait IssueTracker: Send + Sync {
    /// Fetches a single issue by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue does not exist, is not visible to the
    /// caller, or the request fails.
    fn get_issue(&self, key: &str) -> Result<Issue, Box<dyn std::error::Error + Send + Sync>>;
}
