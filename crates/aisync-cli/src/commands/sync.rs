//! Sync command implementation
//!
//! Drives the engine for the requested targets and prints a per-target
//! summary. The process fails when any target's report records an error.

use std::path::Path;

use colored::Colorize;

use aisync_core::sync::{SyncEngine, SyncReport, TargetSelection};
use aisync_core::TargetRegistry;
use aisync_fs::NormalizedPath;

use crate::error::{CliError, Result};

/// Turn the CLI's target arguments into an engine selection.
///
/// "all" (alone or anywhere in the list) selects every registered target.
pub fn selection_from_args(targets: &[String]) -> TargetSelection {
    if targets.is_empty() || targets.iter().any(|t| t == "all") {
        TargetSelection::All
    } else {
        TargetSelection::Named(targets.to_vec())
    }
}

/// Run the sync command
pub fn run_sync(path: &Path, targets: &[String], init_dirs: bool) -> Result<()> {
    let root = NormalizedPath::new(path);
    let engine = SyncEngine::new(root)?;
    let selection = selection_from_args(targets);

    if init_dirs {
        println!("{} Initializing output directories...", "=>".blue().bold());
        let created = engine.init_dirs(&selection)?;
        for dir in &created {
            println!("   {} {}", "+".green(), dir.as_str().cyan());
        }
        println!("{} {} directories ready.", "OK".green().bold(), created.len());
        return Ok(());
    }

    println!("{} Syncing tool configurations...", "=>".blue().bold());
    let reports = engine.sync(&selection)?;

    let mut total_errors = 0;
    for report in &reports {
        print_report(report);
        total_errors += report.errors.len();
    }

    if total_errors > 0 {
        return Err(CliError::user(format!(
            "sync completed with {total_errors} error(s)"
        )));
    }
    println!("{} All targets in sync.", "OK".green().bold());
    Ok(())
}

fn print_report(report: &SyncReport) {
    let status = if report.is_clean() {
        "OK".green().bold()
    } else {
        "FAILED".red().bold()
    };
    println!(
        "{} {}: {} written, {} skipped",
        status,
        report.target.cyan(),
        report.files_written,
        report.files_skipped
    );
    for issue in &report.errors {
        println!("   {} {}: {}", "!".red(), issue.path.as_str().cyan(), issue.reason);
    }
}

/// Run the targets command
pub fn run_targets() -> Result<()> {
    let registry = TargetRegistry::with_builtins();
    println!("{} Registered targets:", "=>".blue().bold());
    for target in registry.all() {
        println!(
            "   {} {} -> {}",
            "-".green(),
            target.name.cyan(),
            target.destination_root
        );
    }
    Ok(())
}
