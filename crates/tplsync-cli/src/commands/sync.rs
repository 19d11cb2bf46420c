//! Sync command implementation
//!
//! Runs one reconciliation and prints the report.

use colored::Colorize;

use tplsync_core::{RunReport, SyncEngine};

use crate::context::RunContext;
use crate::error::Result;

/// Run the sync command
///
/// With `json`, only machine-readable output is printed on stdout: the
/// full run report, or the plan when combined with `dry_run`. Rejected
/// patterns are then listed on stderr, since the plan has no room for
/// them.
pub fn run_sync(
    context: &RunContext,
    tag: &str,
    dry_run: bool,
    json: bool,
    max_size: Option<usize>,
) -> Result<()> {
    let config = context
        .run_config(tag)?
        .with_size_limit(max_size)
        .with_dry_run(dry_run);

    if !json {
        let tag_note = if tag.is_empty() {
            String::new()
        } else {
            format!(" (tag {})", tag.cyan())
        };
        println!(
            "{} Syncing templates in {}{}",
            "=>".blue().bold(),
            config.root.as_str().cyan(),
            tag_note
        );
    }

    let engine = SyncEngine::new(config)?;

    if json {
        let output = if dry_run {
            for rejected in engine.rejected_patterns() {
                eprintln!("{}: {}", "warning".yellow().bold(), rejected);
            }
            serde_json::to_string_pretty(&engine.plan()?)?
        } else {
            serde_json::to_string_pretty(&engine.run()?)?
        };
        println!("{}", output);
        return Ok(());
    }

    let report = engine.run()?;
    print_report(&report, dry_run);
    Ok(())
}

fn print_report(report: &RunReport, dry_run: bool) {
    for action in &report.actions {
        println!("   {} {}", "+".green(), action);
    }
    for warning in &report.warnings {
        println!("   {} {}", "!".yellow(), warning);
    }

    if dry_run {
        println!("{} Dry run, nothing was changed.", "DRY RUN".yellow().bold());
        return;
    }

    if report.pruned_dirs > 0 {
        println!(
            "   {} removed {} empty director{}",
            "-".dimmed(),
            report.pruned_dirs,
            if report.pruned_dirs == 1 { "y" } else { "ies" }
        );
    }

    println!("{} {}", "OK".green().bold(), report.stats);

    if !report.is_clean() {
        println!(
            "{} {} template(s) could not be read, {} could not be written",
            "WARN".yellow().bold(),
            report.stats.pack_read_errors,
            report.stats.unpack_write_errors
        );
    }
}
