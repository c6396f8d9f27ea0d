//! Domain types for the krsync registry.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem
//! paths. Everything here is rebuilt from disk on every run.

use std::fmt;
use std::path::PathBuf;

use semver::Version;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for a configured monorepo component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentName(pub String);

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ComponentName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ComponentName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A monorepo component that depends on the shared kr-library.
///
/// `installed` and `expected` are independent facts: a component can be
/// behind its own pin and behind the newest remote tag at the same time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: ComponentName,
    /// Absolute path to the component directory on disk.
    pub path: PathBuf,
    /// Version present under `node_modules`, if the library was ever
    /// installed for this component.
    pub installed: Option<Version>,
    /// Version the component's own manifest pins via `#semver:`.
    pub expected: Version,
}

impl Component {
    /// False when the shared library has never been installed here.
    pub fn is_installed(&self) -> bool {
        self.installed.is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newtype_display() {
        assert_eq!(ComponentName::from("admin").to_string(), "admin");
    }

    #[test]
    fn newtype_equality() {
        let a = ComponentName::from("x");
        let b = ComponentName::from(String::from("x"));
        assert_eq!(a, b);
    }

    #[test]
    fn is_installed_tracks_the_installed_field() {
        let mut component = Component {
            name: ComponentName::from("admin"),
            path: PathBuf::from("/repo/admin"),
            installed: None,
            expected: Version::parse("1.0.0").expect("version"),
        };
        assert!(!component.is_installed());
        component.installed = Some(Version::parse("1.0.0").expect("version"));
        assert!(component.is_installed());
    }
}
