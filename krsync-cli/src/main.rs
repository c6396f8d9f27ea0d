//! krsync — keep the shared kr-library in step across monorepo components.
//!
//! # Usage
//!
//! ```text
//! krsync
//! ```
//!
//! No flags. The tool checks that it is running inside the expected
//! monorepo, resolves the newest kr-library tag, prints a version status
//! table for every configured component, and interactively offers one
//! install/upgrade action per run.

mod orchestrator;
mod prompt;
mod table;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use orchestrator::Outcome;

#[derive(Parser, Debug)]
#[command(
    name = "krsync",
    version,
    about = "Synchronize the shared kr-library version across monorepo components",
    long_about = None,
)]
struct Cli {}

fn main() -> ExitCode {
    let _cli = Cli::parse();
    init_tracing();

    match orchestrator::run() {
        Ok(outcome) => {
            report(outcome);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::UpToDate => {}
        Outcome::Declined => println!("Nothing changed."),
        Outcome::Installed { installed, failed: 0 } => {
            println!(
                "{}",
                format!("Installed kr-library for {installed} component(s).").green()
            );
        }
        Outcome::Installed { installed, failed } => {
            println!(
                "{}",
                format!(
                    "{installed} install(s) succeeded, {failed} failed; see the log output above."
                )
                .yellow()
            );
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
