//! Error types for krsync-git.

use thiserror::Error;

/// All errors that can arise from git subprocess queries.
#[derive(Debug, Error)]
pub enum GitError {
    /// git itself could not be spawned (missing binary, bad permissions).
    #[error("failed to spawn git: {0}")]
    Spawn(#[from] std::io::Error),

    /// git ran and exited non-zero; stderr is captured verbatim.
    #[error("`git {args}` failed ({status}): {stderr}")]
    Command {
        args: String,
        status: String,
        stderr: String,
    },

    /// `ls-remote` returned tags, but none of them were plain `vX.Y.Z`.
    #[error("no version tags matching vX.Y.Z found at {url}")]
    NoVersionTags { url: String },
}
