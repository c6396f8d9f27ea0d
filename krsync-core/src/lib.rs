//! krsync core — domain types, configuration, manifest I/O, version state.
//!
//! Public API surface:
//! - [`types`] — newtypes and domain structs
//! - [`config`] — fixed constants and the [`Settings`] struct
//! - [`manifest`] — typed reads/writes of the kr-library pin
//! - [`registry`] — component discovery and version-state filters
//! - [`version`] — semver comparison with absent-least ordering
//! - [`error`] — [`ConfigError`], [`VersionError`]

pub mod config;
pub mod error;
pub mod manifest;
pub mod registry;
pub mod types;
pub mod version;

pub use config::Settings;
pub use error::{ConfigError, VersionError};
pub use registry::Registry;
pub use types::{Component, ComponentName};
