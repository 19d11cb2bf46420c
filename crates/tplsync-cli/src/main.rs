//! tplsync CLI
//!
//! Keeps a folder of skill templates and its templates.csv database in
//! agreement under a tagged inclusion policy.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use context::RunContext;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    let context = RunContext::new(cli.root, cli.config);

    match cli.command {
        Some(cmd) => execute_command(&context, cmd),
        None => {
            // No command provided - show help hint
            println!("{} template sync", "tplsync".green().bold());
            println!();
            println!("Run {} for available commands.", "tplsync --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(context: &RunContext, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Sync {
            tag,
            dry_run,
            json,
            max_size,
        } => commands::run_sync(
            context,
            tag.as_deref().unwrap_or_default(),
            dry_run,
            json,
            max_size,
        ),
        Commands::Explain { tag, paths } => commands::run_explain(context, &tag, &paths),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_user() {
        let error = crate::error::CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
    }

    #[test]
    fn test_core_error_converts() {
        let core = tplsync_core::Error::UnsupportedFormat {
            extension: "yaml".to_string(),
        };
        let error: crate::error::CliError = core.into();
        assert_eq!(error.to_string(), "Unsupported policy format: yaml");
    }
}
