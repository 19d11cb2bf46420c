//! Explain command implementation
//!
//! Prints the filter decision, and the rule behind it, for each path.

use colored::Colorize;

use tplsync_core::{Explanation, SyncEngine};
use tplsync_fs::TEMPLATE_SUFFIX;

use crate::context::RunContext;
use crate::error::{CliError, Result};

/// Run the explain command
pub fn run_explain(context: &RunContext, tag: &str, paths: &[String]) -> Result<()> {
    if let Some(path) = paths.iter().find(|p| !p.ends_with(TEMPLATE_SUFFIX)) {
        return Err(CliError::user(format!(
            "`{}` is not a template path (expected a {} file)",
            path, TEMPLATE_SUFFIX
        )));
    }

    let config = context.run_config(tag)?;
    let policy_note = config
        .policy_file
        .as_ref()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "no policy file".to_string());
    let engine = SyncEngine::new(config)?;

    println!(
        "{} Tag {} ({}, {} rule(s))",
        "=>".blue().bold(),
        tag.cyan(),
        policy_note.dimmed(),
        engine.filter().len()
    );

    for rejected in engine.rejected_patterns() {
        println!("   {} {}", "!".yellow(), rejected);
    }

    for path in paths {
        println!("   {}", describe(&engine.explain(path)));
    }

    Ok(())
}

fn describe(explanation: &Explanation) -> String {
    let verdict = if explanation.included {
        "keep".green().bold()
    } else {
        "drop".red().bold()
    };
    let reason = match &explanation.rule {
        Some((pattern, polarity)) => format!("{} `{}`", polarity, pattern),
        None => "no rule matched".to_string(),
    };
    format!("{} {} ({})", verdict, explanation.path, reason.dimmed())
}
