//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// tplsync - Keep a template folder and its templates.csv in sync
#[derive(Parser, Debug)]
#[command(name = "tplsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Template root (defaults to <Documents>/Guild Wars/Templates/Skills)
    #[arg(long, global = true, env = "TPLSYNC_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Policy file (.ini or .toml)
    #[arg(long, global = true, env = "TPLSYNC_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Reconcile the template folder with templates.csv
    ///
    /// Examples:
    ///   tplsync sync               # No tag, every template is kept
    ///   tplsync sync pvp           # Apply the [pvp] rules
    ///   tplsync sync pvp --dry-run # Show what would happen
    Sync {
        /// Policy tag selecting the rule section
        tag: Option<String>,

        /// Preview actions without touching any file
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Skip templates larger than this many bytes
        #[arg(long, value_name = "BYTES")]
        max_size: Option<usize>,
    },

    /// Show which rule decides each path under a tag
    Explain {
        /// Policy tag selecting the rule section
        tag: String,

        /// Template paths relative to the root
        #[arg(required = true)]
        paths: Vec<String>,
    },
}
