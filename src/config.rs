//! Credentials loaded from the environment.

use thiserror::Error;

/// Variable holding the Jira API token.
pub const API_TOKEN_VAR: &str = "JIRA_API_TOKEN";
/// Variable holding the account e-mail the token belongs to.
pub const USER_EMAIL_VAR: &str = "JIRA_USER_EMAIL";
/// Optional file of `KEY=value` lines, relative to the working directory.
pub const ENV_FILE: &str = ".env";

/// Configuration errors reported before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// One or more required variables are unset or empty.
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<&'static str>),
}

/// Jira service account credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API token used as the basic-auth password.
    pub api_token: String,
    /// Account e-mail used as the basic-auth user name.
    pub user_email: String,
}

impl Config {
    /// Loads credentials from the process environment.
    ///
    /// A `.env` file in the working directory (parent directories are not
    /// searched) is read first if present; variables already set in the
    /// environment take precedence. A malformed `.env` is logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVars`] naming every missing variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::from_path(ENV_FILE) {
            Ok(()) => tracing::debug!(path = ENV_FILE, "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(path = ENV_FILE, "ignoring unreadable .env: {e}"),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable lookup. Empty values count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVars`] naming every missing variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let api_token = get(API_TOKEN_VAR);
        let user_email = get(USER_EMAIL_VAR);

        match (api_token, user_email) {
            (Some(api_token), Some(user_email)) => Ok(Self { api_token, user_email }),
            (api_token, user_email) => {
                let mut missing = Vec::new();
                if api_token.is_none() {
                    missing.push(API_TOKEN_VAR);
                }
                if user_email.is_none() {
                    missing.push(USER_EMAIL_VAR);
                }
                Err(ConfigError::MissingVars(missing))
            }
        }
    }
}
