//! The reconciliation state machine.
//!
//! Fixed sequence: EnvironmentCheck → Discover → Display →
//! ReconcileUninstalled → ReconcileExpected → ReconcileLatest. Later
//! reconcile states are only reached when the earlier ones found nothing to
//! do; a "yes" anywhere runs one install batch and terminates. Every state
//! reports back through [`Outcome`] — the process exit happens exactly once,
//! in `main`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use semver::Version;

use krsync_core::{config, manifest, registry, Component, Registry, Settings};
use krsync_npm::{install_batch, npm_version, BatchReport, InstallJob};

use crate::prompt;
use crate::table;

/// Terminal result of a run. `main` maps every variant to exit code 0;
/// errors map to 1.
#[derive(Debug)]
pub enum Outcome {
    /// Nothing to reconcile.
    UpToDate,
    /// There was work to do and the user said no.
    Declined,
    /// An install batch ran.
    Installed { installed: usize, failed: usize },
}

/// Which reconciliation step applies. At most one per run, in priority
/// order: never-installed beats behind-expected beats behind-latest.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    InstallMissing(Vec<Component>),
    UpgradeToExpected(Vec<Component>),
    UpgradeToLatest(Vec<Component>),
    Nothing,
}

pub fn run() -> Result<Outcome> {
    let root = environment_check()?;
    let settings = Settings::load(&root).context("failed to load sync config")?;
    let registry = discover(&settings)?;

    print!("{}", table::render(&registry));
    println!();

    reconcile(&registry)
}

// ---------------------------------------------------------------------------
// 1. EnvironmentCheck
// ---------------------------------------------------------------------------

fn environment_check() -> Result<PathBuf> {
    let root = krsync_git::toplevel()
        .context("krsync must be run inside the monorepo checkout")?;

    let remote = krsync_git::push_remote_url("origin")
        .context("failed to read the push URL of 'origin'")?;
    if !remote.contains(config::EXPECTED_REMOTE_OWNER) {
        bail!(
            "push remote '{remote}' does not belong to {}; refusing to run",
            config::EXPECTED_REMOTE_OWNER.trim_end_matches('/')
        );
    }

    if krsync_git::user_email()?.is_empty() {
        eprintln!(
            "{} git user.email is not set",
            "warning:".yellow().bold()
        );
    }

    let npm = npm_version().context("failed to probe npm")?;
    let min = Version::parse(config::MIN_NPM_VERSION)
        .context("minimum npm version constant is not a valid semver")?;
    if npm < min {
        bail!("npm {npm} is too old; krsync needs at least {min}");
    }
    tracing::debug!(%npm, root = %root.display(), "environment check passed");

    Ok(root)
}

// ---------------------------------------------------------------------------
// 2. Discover
// ---------------------------------------------------------------------------

fn discover(settings: &Settings) -> Result<Registry> {
    let latest = krsync_git::latest_version_tag(&settings.library_url)
        .with_context(|| {
            format!("failed to resolve the latest {} tag", config::LIBRARY_NAME)
        })?;
    let components = registry::discover(settings).context("component discovery failed")?;
    Ok(Registry::new(components, latest))
}

// ---------------------------------------------------------------------------
// 3–6. Reconciliation
// ---------------------------------------------------------------------------

fn next_action(registry: &Registry) -> Action {
    let missing: Vec<Component> = registry.uninstalled().into_iter().cloned().collect();
    if !missing.is_empty() {
        return Action::InstallMissing(missing);
    }

    let behind: Vec<Component> = registry
        .outdated_vs_expected()
        .into_iter()
        .cloned()
        .collect();
    if !behind.is_empty() {
        return Action::UpgradeToExpected(behind);
    }

    let lagging: Vec<Component> = registry
        .outdated_vs_latest()
        .into_iter()
        .cloned()
        .collect();
    if !lagging.is_empty() {
        return Action::UpgradeToLatest(lagging);
    }

    Action::Nothing
}

fn reconcile(registry: &Registry) -> Result<Outcome> {
    match next_action(registry) {
        Action::Nothing => {
            println!(
                "{}",
                format!(
                    "All components are in sync with {} {}.",
                    config::LIBRARY_NAME,
                    registry.latest()
                )
                .green()
            );
            Ok(Outcome::UpToDate)
        }

        Action::InstallMissing(components) => {
            let question = format!(
                "{} was never installed for {}. Install now?",
                config::LIBRARY_NAME,
                describe(&components)
            );
            if !prompt::confirm(&question)? {
                return Ok(Outcome::Declined);
            }
            install(&components).map(outcome_from)
        }

        Action::UpgradeToExpected(components) => {
            let question = format!(
                "{} is behind its pinned version for {}. Upgrade now?",
                config::LIBRARY_NAME,
                describe(&components)
            );
            if !prompt::confirm(&question)? {
                return Ok(Outcome::Declined);
            }
            install(&components).map(outcome_from)
        }

        Action::UpgradeToLatest(components) => {
            let question = format!(
                "A newer {} ({}) is available for {}. Upgrade now?",
                config::LIBRARY_NAME,
                registry.latest(),
                describe(&components)
            );
            if !prompt::confirm(&question)? {
                return Ok(Outcome::Declined);
            }
            // The pin moves first; npm then installs what the manifest says.
            for component in &components {
                manifest::write_pin(&component.path, registry.latest()).with_context(|| {
                    format!("failed to update the pin for '{}'", component.name)
                })?;
            }
            install(&components).map(outcome_from)
        }
    }
}

fn describe(components: &[Component]) -> String {
    let names: Vec<String> = components.iter().map(|c| c.name.to_string()).collect();
    format!("{} component(s) ({})", components.len(), names.join(", "))
}

fn install(components: &[Component]) -> Result<BatchReport> {
    let jobs: Vec<InstallJob> = components
        .iter()
        .map(|c| InstallJob {
            component: c.name.to_string(),
            dir: c.path.clone(),
        })
        .collect();
    install_batch(jobs).context("install batch could not be scheduled")
}

fn outcome_from(report: BatchReport) -> Outcome {
    Outcome::Installed {
        installed: report.succeeded.len(),
        failed: report.failed.len(),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
