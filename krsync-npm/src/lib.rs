//! npm invocation for krsync — version probe and staggered install batches.
//!
//! The actual package manager is an opaque subprocess: this crate spawns it,
//! streams its output into the log, and reports exit codes. See [`install`]
//! for the batch scheduling policy.

pub mod error;
pub mod install;

pub use error::NpmError;
pub use install::{install_batch, BatchReport, InstallJob, INSTALL_STAGGER_MS};

use std::process::Command;

use semver::Version;

/// `npm --version`, parsed as semver.
pub fn npm_version() -> Result<Version, NpmError> {
    let output = Command::new("npm")
        .arg("--version")
        .output()
        .map_err(NpmError::Spawn)?;

    if !output.status.success() {
        return Err(NpmError::VersionProbe {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Version::parse(&text).map_err(|source| NpmError::BadVersion {
        output: text.clone(),
        source,
    })
}
