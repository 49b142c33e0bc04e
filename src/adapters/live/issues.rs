//! Live adapter for the `IssueTracker` port using the Jira REST v2 API.

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use crate::ports::{Issue, IssueTracker};

const ISSUE_ENDPOINT: &str = "rest/api/2/issue";

/// Errors raised while constructing a [`JiraIssueTracker`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL did not parse or was not http(s).
    #[error("invalid Jira URL {url:?}: {reason}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// What was wrong with it.
        reason: String,
    },
    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Live issue tracker talking to Jira Cloud with basic auth.
pub struct JiraIssueTracker {
    client: Client,
    base_url: String,
    user_email: String,
    api_token: String,
}

impl JiraIssueTracker {
    /// Creates a tracker for the Jira instance at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not an absolute http(s) URL or the
    /// HTTP client cannot be initialised.
    pub fn new(base_url: &str, user_email: &str, api_token: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        let client = Client::builder()
            .user_agent(concat!("sigrab/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_email: user_email.to_string(),
            api_token: api_token.to_string(),
        })
    }

    /// The normalised base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn issue_url(&self, key: &str) -> String {
        format!("{}/{ISSUE_ENDPOINT}/{key}", self.base_url)
    }
}

/// Error body returned by Jira on failed requests.
#[derive(Deserialize)]
struct JiraError {
    #[serde(rename = "errorMessages", default)]
    error_messages: Vec<String>,
}

impl IssueTracker for JiraIssueTracker {
    fn get_issue(&self, key: &str) -> Result<Issue, Box<dyn std::error::Error + Send + Sync>> {
        if key.is_empty() {
            return Err("issue key must not be empty".into());
        }

        let response = self
            .client
            .get(self.issue_url(key))
            .basic_auth(&self.user_email, Some(&self.api_token))
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                format!("Jira request for {key} failed: {e}").into()
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
            format!("Failed to read Jira response for {key}: {e}").into()
        })?;

        if !status.is_success() {
            let msg = serde_json::from_str::<JiraError>(&body)
                .ok()
                .filter(|e| !e.error_messages.is_empty())
                .map_or(body, |e| e.error_messages.join("; "));
            return Err(format!("Jira API error ({}) for {key}: {msg}", status.as_u16()).into());
        }

        serde_json::from_str(&body).map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
            format!("Failed to parse Jira issue {key}: {e}").into()
        })
    }
}
