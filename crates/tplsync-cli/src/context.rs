//! Run context resolution
//!
//! Turns the global `--root` / `--config` flags into a [`RunConfig`].

use std::path::PathBuf;

use tplsync_core::{PolicyLocator, RunConfig, resolve_root};

use crate::error::Result;

/// Global options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl RunContext {
    pub fn new(root: Option<PathBuf>, config: Option<PathBuf>) -> Self {
        Self { root, config }
    }

    /// Resolve the template root and policy file for `tag`.
    pub fn run_config(&self, tag: &str) -> Result<RunConfig> {
        self.run_config_with(tag, &PolicyLocator::default())
    }

    fn run_config_with(&self, tag: &str, locator: &PolicyLocator) -> Result<RunConfig> {
        let root = resolve_root(self.root.as_deref())?;
        let policy = locator.resolve(self.config.as_deref());
        match &policy {
            Some(path) => tracing::debug!("policy file: {}", path),
            None => tracing::debug!(
                "no policy file in {}",
                display_dirs(locator.search_dirs())
            ),
        }
        Ok(RunConfig::new(root).with_tag(tag).with_policy_file(policy))
    }
}

fn display_dirs(dirs: &[PathBuf]) -> String {
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
