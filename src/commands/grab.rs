//! The grab run: set up the output directory and walk the issues.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::context::ServiceContext;
use crate::fetch::Fetcher;
use crate::key::IssueKey;
use crate::paths;

/// Execute a grab with the given service context.
///
/// # Errors
///
/// Returns an error string if `--from` is malformed, the output directory
/// cannot be created, or the fetch fails.
pub fn run_with_context(ctx: &ServiceContext, cli: &Cli) -> Result<(), String> {
    let (dir, count) = grab(ctx, cli)?;
    println!("Fetched {count} issues into {}", dir.display());
    Ok(())
}

fn grab(ctx: &ServiceContext, cli: &Cli) -> Result<(PathBuf, usize), String> {
    if let Some(from) = &cli.from {
        IssueKey::parse(from).map_err(|e| format!("invalid --from key: {e}"))?;
        tracing::warn!(%from, "--from is ignored; issues are fetched down to 1");
    }

    let dir = paths::init_dir(ctx.fs.as_ref(), ctx.clock.as_ref(), cli.path.as_deref())
        .map_err(|e| e.to_string())?;

    let issues = Fetcher::new(ctx.issues.as_ref(), ctx.fs.as_ref())
        .fetch_backward(&cli.to, &dir)
        .map_err(|e| format!("failed to fetch issues: {e}"))?;

    Ok((dir, issues.len()))
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use clap::Parser;

    use super::*;
    use crate::adapters::live::LiveFileSystem;
    use crate::ports::{Clock, Issue, IssueTracker};

    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
        }
    }

    struct EvenOnly;

    impl IssueTracker for EvenOnly {
        fn get_issue(&self, key: &str) -> Result<Issue, Box<dyn std::error::Error + Send + Sync>> {
            let n: u64 = key.rsplit('-').next().unwrap().parse().unwrap();
            if n % 2 == 0 {
                Ok(Issue::new(key, "even"))
            } else {
                Err("not found".into())
            }
        }
    }

    fn ctx() -> ServiceContext {
        ServiceContext::new(Box::new(FixedClock), Box::new(LiveFileSystem), Box::new(EvenOnly))
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(["sigrab", "--url", "https://acme.atlassian.net"].iter().chain(args).copied())
    }

    #[test]
    fn writes_into_timestamped_directory() {
        let base = tempfile::tempdir().unwrap();
        let base_str = base.path().to_str().unwrap();

        let (dir, count) = grab(&ctx(), &cli(&["--to", "OPS-4", "--path", base_str])).unwrap();

        assert_eq!(dir, base.path().join("20250102_030405"));
        assert_eq!(count, 2);
        assert!(dir.join("OPS-4.json").exists());
        assert!(dir.join("OPS-2.json").exists());
        assert!(!dir.join("OPS-3.json").exists());
    }

    #[test]
    fn malformed_to_is_reported() {
        let base = tempfile::tempdir().unwrap();
        let base_str = base.path().to_str().unwrap();

        let err = grab(&ctx(), &cli(&["--to", "OPS4", "--path", base_str])).unwrap_err();

        assert!(err.starts_with("failed to fetch issues: failed to parse issue key OPS4"), "{err}");
    }

    #[test]
    fn malformed_from_is_rejected_before_any_work() {
        let base = tempfile::tempdir().unwrap();
        let base_str = base.path().to_str().unwrap();

        let err =
            grab(&ctx(), &cli(&["--from", "x", "--to", "OPS-2", "--path", base_str])).unwrap_err();

        assert!(err.starts_with("invalid --from key"), "{err}");
        assert_eq!(std::fs::read_dir(base.path()).unwrap().count(), 0);
    }

    #[test]
    fn valid_from_does_not_change_the_range() {
        let base = tempfile::tempdir().unwrap();
        let base_str = base.path().to_str().unwrap();

        let (_, count) =
            grab(&ctx(), &cli(&["--from", "OPS-3", "--to", "OPS-4", "--path", base_str])).unwrap();

        assert_eq!(count, 2);
    }
}
