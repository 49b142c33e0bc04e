//! Command dispatch and handlers.

pub mod grab;

use std::env;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::cassette::recorder::CassetteRecorder;
use crate::cli::Cli;
use crate::config::Config;
use crate::context::{finish_recording, ServiceContext};

/// Records tracker traffic of a live run to this cassette file.
pub const RECORD_VAR: &str = "SIGRAB_RECORD";
/// Replays tracker traffic from this cassette file instead of calling Jira.
pub const REPLAY_VAR: &str = "SIGRAB_REPLAY";

/// Dispatch parsed arguments to the grab handler.
///
/// When `SIGRAB_RECORD` is set, tracker calls are recorded to that file,
/// which is written once the run ends, even if it failed. When
/// `SIGRAB_REPLAY` is set, they are served from it and no credentials are
/// required.
///
/// # Errors
///
/// Returns an error string if configuration, context setup, the run or
/// writing the cassette fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let (ctx, recorder) = build_context(
        &cli.url,
        env::var_os(RECORD_VAR).map(PathBuf::from),
        env::var_os(REPLAY_VAR).map(PathBuf::from),
    )?;

    let result = grab::run_with_context(&ctx, cli);

    if let Some(recorder) = recorder {
        // The context holds the other reference to the recorder.
        drop(ctx);
        let path = finish_recording(recorder)?;
        eprintln!("Recording saved to: {}", path.display());
    }

    result
}

type Recorder = Arc<Mutex<CassetteRecorder>>;

fn build_context(
    url: &str,
    record: Option<PathBuf>,
    replay: Option<PathBuf>,
) -> Result<(ServiceContext, Option<Recorder>), String> {
    match (record, replay) {
        (Some(_), Some(_)) => Err(format!("{RECORD_VAR} and {REPLAY_VAR} cannot both be set")),
        (None, Some(cassette)) => {
            tracing::info!(cassette = %cassette.display(), "replaying tracker traffic");
            Ok((ServiceContext::replaying(&cassette)?, None))
        }
        (record, None) => {
            let config = Config::from_env().map_err(|e| format!("failed to load config: {e}"))?;
            match record {
                Some(cassette) => {
                    tracing::info!(cassette = %cassette.display(), "recording tracker traffic");
                    let (ctx, recorder) = ServiceContext::recording(url, &config, &cassette)?;
                    Ok((ctx, Some(recorder)))
                }
                None => Ok((ServiceContext::live(url, &config)?, None)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_replay_are_exclusive() {
        let err = build_context(
            "https://x",
            Some(PathBuf::from("a.yaml")),
            Some(PathBuf::from("b.yaml")),
        )
        .err()
        .unwrap();
        assert!(err.contains("cannot both be set"));
    }

    #[test]
    fn replay_does_not_need_credentials() {
        let err = build_context("https://x", None, Some(PathBuf::from("/nonexistent.yaml")))
            .err()
            .unwrap();
        assert!(err.contains("Failed to read cassette file"), "{err}");
    }
}
