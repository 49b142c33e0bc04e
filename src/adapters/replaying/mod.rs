//! Replaying adapters that replay recorded interactions.

pub mod issues;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::format::Interaction;
use crate::cassette::replayer::CassetteReplayer;

pub use issues::ReplayingIssueTracker;

/// Pull the next interaction for `port::method`.
///
/// # Panics
///
/// Panics if the cassette is exhausted for that pair.
pub(crate) fn next_interaction(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> Interaction {
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).clone()
}

/// Decode a recorded `{"Ok": v}` / `{"Err": msg}` output back into a `Result`.
///
/// Mirror of `recording::record_result`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(err) = output.get("Err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let Some(value) = output.get("Ok") else {
        return Err(format!("cassette output is neither Ok nor Err: {output}").into());
    };
    serde_json::from_value(value.clone())
        .map_err(|e| format!("failed to deserialize recorded value: {e}").into())
}
