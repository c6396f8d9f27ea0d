//! Component discovery and version-state filtering.
//!
//! A [`Registry`] is a per-run snapshot: one [`Component`] per configured
//! entry (config order) plus the single newest remote tag. It is never
//! persisted; an install changes the manifests on disk and is observed by
//! discovering again.

use std::cmp::Ordering;
use std::path::Path;

use semver::Version;

use crate::config::Settings;
use crate::error::ConfigError;
use crate::manifest;
use crate::types::{Component, ComponentName};
use crate::version;

// ---------------------------------------------------------------------------
// 1. Discovery
// ---------------------------------------------------------------------------

/// Build one [`Component`] per configured entry, in config order.
///
/// Fails on the first manifest that is present but unparsable; the caller
/// gets the path in the error and nothing is retried.
pub fn discover(settings: &Settings) -> Result<Vec<Component>, ConfigError> {
    let mut components = Vec::with_capacity(settings.components.len());
    for (name, dir) in &settings.components {
        components.push(discover_one(name, dir)?);
    }
    Ok(components)
}

fn discover_one(name: &ComponentName, dir: &Path) -> Result<Component, ConfigError> {
    let expected = manifest::read_expected(dir)?;
    let installed = manifest::read_installed(dir)?;
    Ok(Component {
        name: name.clone(),
        path: dir.to_path_buf(),
        installed,
        expected,
    })
}

// ---------------------------------------------------------------------------
// 2. Registry
// ---------------------------------------------------------------------------

/// Snapshot of every component plus the newest remote tag.
#[derive(Debug, Clone)]
pub struct Registry {
    components: Vec<Component>,
    latest: Version,
}

impl Registry {
    pub fn new(components: Vec<Component>, latest: Version) -> Self {
        Self { components, latest }
    }

    /// Components in discovery order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Newest `vX.Y.Z` tag on the library's remote.
    pub fn latest(&self) -> &Version {
        &self.latest
    }

    /// Components the library was never installed under.
    pub fn uninstalled(&self) -> Vec<&Component> {
        self.components
            .iter()
            .filter(|c| !c.is_installed())
            .collect()
    }

    /// Installed components running behind their own manifest pin.
    pub fn outdated_vs_expected(&self) -> Vec<&Component> {
        self.components
            .iter()
            .filter(|c| c.is_installed())
            .filter(|c| {
                version::compare(c.installed.as_ref(), Some(&c.expected)) == Ordering::Less
            })
            .collect()
    }

    /// Components whose pin lags the newest remote tag.
    pub fn outdated_vs_latest(&self) -> Vec<&Component> {
        self.components
            .iter()
            .filter(|c| c.expected < self.latest)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
