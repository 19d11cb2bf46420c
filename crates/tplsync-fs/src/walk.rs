//! Template tree scanning and empty-directory pruning

use std::fs;

use walkdir::WalkDir;

use crate::constants::is_template_name;
use crate::{Error, NormalizedPath, Result};

/// A template file found under the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// Path relative to the root, forward-slash separated
    pub path: NormalizedPath,
    /// Number of directories between the root and the file
    pub depth: usize,
}

/// Recursively list every template file under `root`.
///
/// Entries come back in file-name order per directory. Unreadable
/// subdirectories are skipped with a warning; failing to read the root
/// itself is an error.
pub fn scan_templates(root: &NormalizedPath) -> Result<Vec<ScannedFile>> {
    if !root.is_dir() {
        return Err(Error::RootNotFound {
            path: root.to_native(),
        });
    }

    let native_root = root.to_native();
    let mut files = Vec::new();

    for entry in WalkDir::new(&native_root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(Error::Walk {
                    path: native_root,
                    message: e.to_string(),
                });
            }
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        if !is_template_name(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(&native_root) else {
            continue;
        };
        let path = NormalizedPath::new(relative);
        tracing::debug!(path = %path, "found template");
        files.push(ScannedFile {
            depth: path.depth(),
            path,
        });
    }

    Ok(files)
}

/// Remove directories under `root` that contain nothing, deepest first.
///
/// The root itself is kept. Directories that cannot be read or removed
/// are left alone. Returns the number of directories removed.
pub fn prune_empty_dirs(root: &NormalizedPath) -> Result<usize> {
    if !root.is_dir() {
        return Err(Error::RootNotFound {
            path: root.to_native(),
        });
    }

    let mut removed = 0;
    for entry in WalkDir::new(root.to_native())
        .min_depth(1)
        .follow_links(false)
        .contents_first(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_dir() {
            continue;
        }

        let is_empty = match fs::read_dir(entry.path()) {
            Ok(mut children) => children.next().is_none(),
            Err(_) => false,
        };
        if !is_empty {
            continue;
        }

        match fs::remove_dir(entry.path()) {
            Ok(()) => {
                tracing::debug!("removed empty directory {}", entry.path().display());
                removed += 1;
            }
            Err(e) => {
                tracing::debug!("could not remove {}: {}", entry.path().display(), e);
            }
        }
    }

    Ok(removed)
}
