//! Error types for krsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from config and manifest operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error (write path).
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON parse error on load — includes file path and position context.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The sync config did not exist at the repository toplevel.
    #[error("config not found at {path}; is this checkout set up for krsync?")]
    ConfigNotFound { path: PathBuf },

    /// A component entry's path value was not a JSON string.
    #[error("component path for '{name}' must be a string")]
    BadComponentPath { name: String },

    /// The component manifest has no dependency entry for the shared library.
    #[error("{path} has no '{dependency}' entry under dependencies")]
    MissingDependency { path: PathBuf, dependency: String },

    /// The dependency entry exists but does not carry a `#semver:X.Y.Z` pin.
    #[error("dependency pin '{value}' in {path} does not match '#semver:X.Y.Z'")]
    BadPin { path: PathBuf, value: String },

    #[error(transparent)]
    Version(#[from] VersionError),
}

/// A version string that is neither empty nor valid `MAJOR.MINOR.PATCH`.
#[derive(Debug, Error)]
pub enum VersionError {
    #[error("invalid semantic version '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: semver::Error,
    },
}
