//! Typed access to the two manifest fields krsync owns.
//!
//! A component pins kr-library in its `package.json` as
//! `<prefix>#semver:X.Y.Z` under `dependencies`; the installed copy exposes
//! its own version at `node_modules/kr-library/package.json` → `.version`.
//! Nothing else in either file is read or written.

use std::fs;
use std::path::{Path, PathBuf};

use semver::Version;
use serde::Deserialize;

use crate::config::LIBRARY_NAME;
use crate::error::ConfigError;
use crate::version;

const PIN_MARKER: &str = "#semver:";

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<component>/package.json` — pure, no I/O.
pub fn manifest_path(component_dir: &Path) -> PathBuf {
    component_dir.join("package.json")
}

/// `<component>/node_modules/kr-library/package.json` — pure, no I/O.
pub fn installed_manifest_path(component_dir: &Path) -> PathBuf {
    component_dir
        .join("node_modules")
        .join(LIBRARY_NAME)
        .join("package.json")
}

// ---------------------------------------------------------------------------
// 2. Reads
// ---------------------------------------------------------------------------

/// The subset of the installed library's manifest we consume.
#[derive(Debug, Deserialize)]
struct InstalledManifest {
    #[serde(default)]
    version: String,
}

/// Read the installed version, or `None` when the library was never
/// installed under this component. A manifest that exists but cannot be
/// parsed is an error, not "missing".
pub fn read_installed(component_dir: &Path) -> Result<Option<Version>, ConfigError> {
    let path = installed_manifest_path(component_dir);
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(&path)?;
    let manifest: InstalledManifest = serde_json::from_str(&contents)
        .map_err(|source| ConfigError::Parse { path, source })?;
    Ok(version::parse(&manifest.version)?)
}

/// Read the `#semver:X.Y.Z` pin from the component's own manifest.
pub fn read_expected(component_dir: &Path) -> Result<Version, ConfigError> {
    let path = manifest_path(component_dir);
    let contents = fs::read_to_string(&path)?;
    let manifest: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

    let entry = manifest
        .get("dependencies")
        .and_then(|deps| deps.get(LIBRARY_NAME))
        .and_then(|value| value.as_str())
        .ok_or_else(|| ConfigError::MissingDependency {
            path: path.clone(),
            dependency: LIBRARY_NAME.to_owned(),
        })?;

    parse_pin(entry).ok_or_else(|| ConfigError::BadPin {
        path,
        value: entry.to_owned(),
    })
}

/// Extract `X.Y.Z` from `<prefix>#semver:X.Y.Z`.
fn parse_pin(entry: &str) -> Option<Version> {
    let (_, pinned) = entry.split_once(PIN_MARKER)?;
    Version::parse(pinned.trim()).ok()
}

// ---------------------------------------------------------------------------
// 3. Write (atomic)
// ---------------------------------------------------------------------------

/// Rewrite the pin to `version`, leaving every other manifest field
/// untouched (order-preserving parse, pretty print, `.tmp` sibling →
/// rename so a crash mid-write cannot corrupt the file).
pub fn write_pin(component_dir: &Path, version: &Version) -> Result<(), ConfigError> {
    let path = manifest_path(component_dir);
    let contents = fs::read_to_string(&path)?;
    let mut manifest: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

    let entry = manifest
        .get_mut("dependencies")
        .and_then(|deps| deps.get_mut(LIBRARY_NAME))
        .ok_or_else(|| ConfigError::MissingDependency {
            path: path.clone(),
            dependency: LIBRARY_NAME.to_owned(),
        })?;
    let repinned = {
        let current = entry.as_str().ok_or_else(|| ConfigError::BadPin {
            path: path.clone(),
            value: entry.to_string(),
        })?;
        let (prefix, _) = current.split_once(PIN_MARKER).ok_or_else(|| {
            ConfigError::BadPin {
                path: path.clone(),
                value: current.to_owned(),
            }
        })?;
        format!("{prefix}{PIN_MARKER}{version}")
    };
    *entry = serde_json::Value::String(repinned);

    let rendered = format!("{}\n", serde_json::to_string_pretty(&manifest)?);
    let tmp = path.with_file_name("package.json.tmp");
    fs::write(&tmp, rendered)?;
    fs::rename(&tmp, &path)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PIN_PREFIX: &str = "git+ssh://git@github.com/kr-labs/kr-library.git";

    fn component_with_pin(version: &str) -> TempDir {
        let dir = TempDir::new().expect("tempdir");
        let manifest = serde_json::json!({
            "name": "admin",
            "private": true,
            "dependencies": {
                "left-pad": "^1.3.0",
                "kr-library": format!("{PIN_PREFIX}{PIN_MARKER}{version}"),
            },
            "scripts": { "build": "webpack" }
        });
        fs::write(
            dir.path().join("package.json"),
            format!("{}\n", serde_json::to_string_pretty(&manifest).expect("render")),
        )
        .expect("write manifest");
        dir
    }

    fn v(s: &str) -> Version {
        Version::parse(s).expect("test version")
    }

    #[test]
    fn read_expected_extracts_the_pin() {
        let dir = component_with_pin("1.4.2");
        assert_eq!(read_expected(dir.path()).expect("expected"), v("1.4.2"));
    }

    #[test]
    fn missing_dependency_entry_is_an_error() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(
            dir.path().join("package.json"),
            r#"{ "name": "admin", "dependencies": {} }"#,
        )
        .expect("write manifest");
        let err = read_expected(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingDependency { .. }));
    }

    #[test]
    fn pin_without_semver_marker_is_an_error() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(
            dir.path().join("package.json"),
            format!(r#"{{ "dependencies": {{ "{LIBRARY_NAME}": "^1.0.0" }} }}"#),
        )
        .expect("write manifest");
        let err = read_expected(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::BadPin { .. }));
    }

    #[test]
    fn unparsable_component_manifest_surfaces_the_path() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("package.json"), "{ nope").expect("write manifest");
        let err = read_expected(dir.path()).unwrap_err();
        assert!(err.to_string().contains("package.json"));
    }

    #[test]
    fn read_installed_none_when_never_installed() {
        let dir = component_with_pin("1.0.0");
        assert_eq!(read_installed(dir.path()).expect("installed"), None);
    }

    #[test]
    fn read_installed_reads_nested_manifest_version() {
        let dir = component_with_pin("1.0.0");
        let nested = installed_manifest_path(dir.path());
        fs::create_dir_all(nested.parent().expect("parent")).expect("mkdir");
        fs::write(&nested, r#"{ "name": "kr-library", "version": "0.9.4" }"#)
            .expect("write nested manifest");
        assert_eq!(read_installed(dir.path()).expect("installed"), Some(v("0.9.4")));
    }

    #[test]
    fn unparsable_installed_manifest_is_an_error_not_missing() {
        let dir = component_with_pin("1.0.0");
        let nested = installed_manifest_path(dir.path());
        fs::create_dir_all(nested.parent().expect("parent")).expect("mkdir");
        fs::write(&nested, "][").expect("write nested manifest");
        assert!(read_installed(dir.path()).is_err());
    }

    #[test]
    fn write_pin_roundtrip_only_touches_the_pin() {
        let dir = component_with_pin("1.0.0");
        let before = fs::read_to_string(manifest_path(dir.path())).expect("read before");

        write_pin(dir.path(), &v("2.5.0")).expect("write pin");

        assert_eq!(read_expected(dir.path()).expect("expected"), v("2.5.0"));
        let after = fs::read_to_string(manifest_path(dir.path())).expect("read after");
        assert_eq!(
            after,
            before.replace(
                &format!("{PIN_MARKER}1.0.0"),
                &format!("{PIN_MARKER}2.5.0")
            ),
            "every byte outside the pin must survive the rewrite"
        );
    }

    #[test]
    fn write_pin_cleans_up_tmp() {
        let dir = component_with_pin("1.0.0");
        write_pin(dir.path(), &v("1.1.0")).expect("write pin");
        assert!(!dir.path().join("package.json.tmp").exists());
    }
}
