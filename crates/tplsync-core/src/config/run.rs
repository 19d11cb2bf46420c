//! Per-run settings and their resolution
//!
//! The template root comes from an explicit path or the platform
//! documents directory. The policy file comes from an explicit path or
//! the first match in a fixed list of locations.

use std::path::{Path, PathBuf};

use tplsync_fs::{NormalizedPath, StorePath};

use crate::{Error, Result};

/// Settings for one reconciliation run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Canonical template root
    pub root: NormalizedPath,
    /// Database file, `<root>/templates.csv`
    pub database: NormalizedPath,
    /// Policy tag; the empty tag selects no rules
    pub tag: String,
    /// Policy file, if one was found
    pub policy_file: Option<NormalizedPath>,
    /// Files larger than this many bytes are not packed
    pub size_limit: Option<usize>,
    /// Classify only, touch nothing
    pub dry_run: bool,
}

impl RunConfig {
    pub fn new(root: NormalizedPath) -> Self {
        let database = root.join(StorePath::Database.as_str());
        Self {
            root,
            database,
            tag: String::new(),
            policy_file: None,
            size_limit: None,
            dry_run: false,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_policy_file(mut self, path: Option<NormalizedPath>) -> Self {
        self.policy_file = path;
        self
    }

    pub fn with_size_limit(mut self, limit: Option<usize>) -> Self {
        self.size_limit = limit;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// `<documents>/Guild Wars/Templates/Skills`, if the platform has a
/// documents directory.
pub fn default_root() -> Option<PathBuf> {
    dirs::document_dir().map(|docs| docs.join("Guild Wars").join("Templates").join("Skills"))
}

/// Resolve the template root to a canonical existing directory.
pub fn resolve_root(explicit: Option<&Path>) -> Result<NormalizedPath> {
    let candidate = match explicit {
        Some(path) => path.to_path_buf(),
        None => default_root().ok_or_else(|| Error::RootNotFound {
            path: PathBuf::from("<documents>/Guild Wars/Templates/Skills"),
        })?,
    };

    if !candidate.is_dir() {
        return Err(Error::RootNotFound { path: candidate });
    }

    let canonical = dunce::canonicalize(&candidate).map_err(|_| Error::RootNotFound {
        path: candidate.clone(),
    })?;
    tracing::debug!("template root: {}", canonical.display());
    Ok(NormalizedPath::new(canonical))
}

/// Finds the policy file when none was given explicitly.
///
/// Every `.ini` location is tried before any `.toml` one; within a
/// format, directories are tried in order.
#[derive(Debug, Clone)]
pub struct PolicyLocator {
    search_dirs: Vec<PathBuf>,
}

impl Default for PolicyLocator {
    /// The executable's directory, then `<config>/tplsync`.
    fn default() -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let config_dir = dirs::config_dir().map(|dir| dir.join(StorePath::ConfigDir.as_str()));
        Self {
            search_dirs: exe_dir.into_iter().chain(config_dir).collect(),
        }
    }
}

impl PolicyLocator {
    /// Search only `dirs` (used for testing).
    pub fn with_search_dirs(dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs: dirs }
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// First existing policy file, if any.
    pub fn locate(&self) -> Option<NormalizedPath> {
        [StorePath::PolicyIni, StorePath::PolicyToml]
            .iter()
            .flat_map(|name| self.search_dirs.iter().map(move |dir| dir.join(name.as_str())))
            .find(|candidate| candidate.is_file())
            .map(NormalizedPath::new)
    }

    /// The explicit path if given, otherwise the first located file.
    pub fn resolve(&self, explicit: Option<&Path>) -> Option<NormalizedPath> {
        match explicit {
            Some(path) => Some(NormalizedPath::new(path)),
            None => self.locate(),
        }
    }
}
