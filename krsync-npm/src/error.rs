//! Error types for krsync-npm.

use thiserror::Error;

/// All errors that can arise from driving npm.
///
/// Per-job install failures are deliberately NOT here: they are logged and
/// collected in [`crate::BatchReport`] so one component cannot abort its
/// siblings.
#[derive(Debug, Error)]
pub enum NpmError {
    /// npm itself could not be spawned (missing binary, bad PATH).
    #[error("failed to spawn npm: {0}")]
    Spawn(#[source] std::io::Error),

    /// `npm --version` ran but exited non-zero.
    #[error("`npm --version` failed ({status}): {stderr}")]
    VersionProbe { status: String, stderr: String },

    /// `npm --version` printed something that is not a semver.
    #[error("could not parse npm version '{output}': {source}")]
    BadVersion {
        output: String,
        #[source]
        source: semver::Error,
    },

    /// The tokio runtime for the install batch could not be built.
    #[error("failed to build install runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
