//! Git subprocess queries for krsync.
//!
//! All remote interaction is delegated to the `git` CLI: this crate shells
//! out, checks the exit status, and parses the text output. Nothing here
//! speaks a network protocol.

pub mod error;

pub use error::GitError;

use std::path::PathBuf;
use std::process::Command;

use semver::Version;

// ---------------------------------------------------------------------------
// 1. Local repository queries
// ---------------------------------------------------------------------------

/// Repository toplevel of the current working directory.
pub fn toplevel() -> Result<PathBuf, GitError> {
    run_git(&["rev-parse", "--show-toplevel"]).map(|out| PathBuf::from(out.trim()))
}

/// Configured commit email; empty string when unset (git exits non-zero for
/// an unset key, which is not an error for us).
pub fn user_email() -> Result<String, GitError> {
    match run_git(&["config", "user.email"]) {
        Ok(out) => Ok(out.trim().to_owned()),
        Err(GitError::Command { .. }) => Ok(String::new()),
        Err(other) => Err(other),
    }
}

/// Push URL of the given remote.
pub fn push_remote_url(remote: &str) -> Result<String, GitError> {
    run_git(&["remote", "get-url", "--push", remote]).map(|out| out.trim().to_owned())
}

// ---------------------------------------------------------------------------
// 2. Remote tag listing
// ---------------------------------------------------------------------------

/// All tag refs published at `url`, one `<sha>\trefs/tags/<name>` line each.
pub fn remote_tags(url: &str) -> Result<Vec<String>, GitError> {
    let out = run_git(&["ls-remote", "--tags", "--refs", url])?;
    Ok(out.lines().map(str::to_owned).collect())
}

/// Highest `vX.Y.Z` tag at `url`, by semver precedence — `v1.2.0` beats
/// `v1.1.5` even though string order says otherwise.
pub fn latest_version_tag(url: &str) -> Result<Version, GitError> {
    let lines = remote_tags(url)?;
    latest_from_lines(&lines).ok_or_else(|| GitError::NoVersionTags {
        url: url.to_owned(),
    })
}

fn latest_from_lines<S: AsRef<str>>(lines: &[S]) -> Option<Version> {
    lines.iter().filter_map(|line| tag_version(line.as_ref())).max()
}

/// `<sha>\trefs/tags/v1.2.0` → `1.2.0`. Tags that are not plain `vX.Y.Z`
/// (no `v`, pre-release, build metadata) are ignored.
fn tag_version(line: &str) -> Option<Version> {
    let name = line.rsplit('\t').next()?.trim();
    let bare = name.strip_prefix("refs/tags/")?.strip_prefix('v')?;
    let version = Version::parse(bare).ok()?;
    if version.pre.is_empty() && version.build.is_empty() {
        Some(version)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn run_git(args: &[&str]) -> Result<String, GitError> {
    tracing::debug!("running git {}", args.join(" "));
    let output = Command::new("git").args(args).output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(GitError::Command {
            args: args.join(" "),
            status: output.status.to_string(),
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
