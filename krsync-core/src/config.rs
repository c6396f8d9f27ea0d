//! Runtime settings and the `krsync.json` config file.
//!
//! # Config layout
//!
//! ```text
//! <repo toplevel>/krsync.json
//! {
//!   "url": "git@github.com:kr-labs/kr-library.git",
//!   "component": {
//!     "admin":  "./packages/admin",
//!     "portal": "./packages/portal"
//!   }
//! }
//! ```
//!
//! Mapping order in the file is discovery order. All tunables live here as
//! constants and are folded into one [`Settings`] value at startup; nothing
//! reads configuration from anywhere else at runtime.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::ComponentName;

/// Fixed filename of the sync config at the repository toplevel.
pub const CONFIG_FILE: &str = "krsync.json";

/// npm package name of the shared library being synchronized.
pub const LIBRARY_NAME: &str = "kr-library";

/// The push URL of `origin` must contain this owner segment.
pub const EXPECTED_REMOTE_OWNER: &str = "kr-labs/";

/// Oldest npm release krsync will drive.
pub const MIN_NPM_VERSION: &str = "5.7.0";

/// Raw shape of `krsync.json`. The `component` map keeps file order
/// (serde_json `preserve_order`); duplicate keys collapse to the last entry
/// per JSON object semantics, so names are unique by construction.
#[derive(Debug, Deserialize)]
struct RawConfig {
    url: String,
    component: serde_json::Map<String, serde_json::Value>,
}

/// Validated run configuration, built once at startup and passed by
/// reference into everything that needs it.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Absolute path of the monorepo toplevel.
    pub root: PathBuf,
    /// Git remote URL of the shared library; source of version tags.
    pub library_url: String,
    /// Component name → absolute component directory, in config order.
    pub components: Vec<(ComponentName, PathBuf)>,
}

impl Settings {
    /// Load and validate `<root>/krsync.json`.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound { path });
        }
        let contents = fs::read_to_string(&path)?;
        let raw: RawConfig = serde_json::from_str(&contents)
            .map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;

        let mut components = Vec::with_capacity(raw.component.len());
        for (name, value) in raw.component {
            let rel = value
                .as_str()
                .ok_or_else(|| ConfigError::BadComponentPath { name: name.clone() })?;
            components.push((ComponentName::from(name), root.join(rel)));
        }

        Ok(Settings {
            root: root.to_path_buf(),
            library_url: raw.url,
            components,
        })
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
