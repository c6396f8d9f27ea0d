//! Staggered concurrent `npm install` batches.
//!
//! # Scheduling policy
//!
//! Job i (0-indexed) starts `i * 500ms` after the batch begins, so all
//! installs run concurrently but never grab npm's lock at the same instant.
//! The batch resolves when every job has finished; a non-zero exit for one
//! component is logged and recorded, never propagated — siblings keep
//! running. There is no per-job cancellation; killing the process is the
//! only way to abort a batch.
//!
//! Note: callers rewrite the manifest pin before the batch runs, so a failed
//! install leaves that component's manifest already pointing at the target
//! version. Known inconsistency, kept to match the original behavior.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::sleep;

use crate::error::NpmError;

/// Delay between consecutive install starts within one batch.
pub const INSTALL_STAGGER_MS: u64 = 500;

/// One `npm install` to run in a component directory.
#[derive(Debug, Clone)]
pub struct InstallJob {
    pub component: String,
    pub dir: PathBuf,
}

/// What happened to each job in a batch, in completion-collection order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
}

/// Run `npm install` for every job and block until the whole batch is done.
///
/// Builds its own multi-thread runtime; `Err` only means the batch could not
/// be scheduled at all — per-job failures land in the report.
pub fn install_batch(jobs: Vec<InstallJob>) -> Result<BatchReport, NpmError> {
    run_batch(vec!["npm".to_owned(), "install".to_owned()], jobs)
}

fn run_batch(command: Vec<String>, jobs: Vec<InstallJob>) -> Result<BatchReport, NpmError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(NpmError::Runtime)?;
    Ok(runtime.block_on(run_batch_async(Arc::new(command), jobs)))
}

async fn run_batch_async(command: Arc<Vec<String>>, jobs: Vec<InstallJob>) -> BatchReport {
    let mut handles = Vec::with_capacity(jobs.len());
    for (index, job) in jobs.into_iter().enumerate() {
        let command = command.clone();
        let delay = stagger_delay(index);
        handles.push(tokio::spawn(async move {
            run_one(&command, job, delay).await
        }));
    }

    let mut report = BatchReport::default();
    for handle in handles {
        match handle.await {
            Ok((component, true)) => report.succeeded.push(component),
            Ok((component, false)) => report.failed.push(component),
            Err(err) => tracing::error!(error = %err, "install task panicked"),
        }
    }
    report
}

/// Job i starts `i * 500ms` after the batch begins.
fn stagger_delay(index: usize) -> Duration {
    Duration::from_millis(index as u64 * INSTALL_STAGGER_MS)
}

async fn run_one(command: &[String], job: InstallJob, delay: Duration) -> (String, bool) {
    sleep(delay).await;
    tracing::info!(component = %job.component, "installing in {}", job.dir.display());

    let mut child = match tokio::process::Command::new(&command[0])
        .args(&command[1..])
        .current_dir(&job.dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            tracing::error!(component = %job.component, error = %err, "failed to spawn install");
            return (job.component, false);
        }
    };

    let stdout_task = {
        let stdout = child.stdout.take();
        let component = job.component.clone();
        tokio::spawn(async move {
            let Some(stdout) = stdout else { return };
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                tracing::info!(component = %component, "{line}");
            }
        })
    };
    let stderr_task = {
        let stderr = child.stderr.take();
        let component = job.component.clone();
        tokio::spawn(async move {
            let Some(stderr) = stderr else { return };
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if is_update_nag(&line) {
                    continue;
                }
                tracing::error!(component = %component, "{line}");
            }
        })
    };

    let status = child.wait().await;
    let _ = stdout_task.await;
    let _ = stderr_task.await;

    match status {
        Ok(status) if status.success() => {
            tracing::info!(component = %job.component, "install finished");
            (job.component, true)
        }
        Ok(status) => {
            tracing::error!(component = %job.component, %status, "install failed");
            (job.component, false)
        }
        Err(err) => {
            tracing::error!(component = %job.component, error = %err, "install did not complete");
            (job.component, false)
        }
    }
}

/// npm's update-notifier writes a self-update nag to stderr. It is noise,
/// not an install failure, and must not show up as an error line.
fn is_update_nag(line: &str) -> bool {
    line.contains("npm update check") || line.contains("version of npm available")
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
