//! Reconciliation records and their actions

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tplsync_fs::NormalizedPath;

/// What a run does with one path.
///
/// Assigned once when the record is created and never changed. The
/// declaration order is the execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// File on disk, kept by the policy: capture its content
    Pack,
    /// Database only, kept by the policy: recreate the file
    Unpack,
    /// File on disk, dropped by the policy: capture, then delete
    Remove,
    /// Database only, dropped by the policy: leave the line dormant
    Ignore,
}

impl Action {
    /// Action for a path found on disk.
    pub fn for_file(included: bool) -> Self {
        if included { Self::Pack } else { Self::Remove }
    }

    /// Action for a path found only in the database.
    pub fn for_stored(included: bool) -> Self {
        if included { Self::Unpack } else { Self::Ignore }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pack => "pack",
            Self::Unpack => "unpack",
            Self::Remove => "remove",
            Self::Ignore => "ignore",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The reconciliation unit for one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub path: NormalizedPath,
    pub depth: usize,
    pub action: Action,
    /// Content written to the database line for this path.
    pub payload: Vec<u8>,
    /// What the database held for a path that also exists on disk.
    ///
    /// Only used to tell first captures from updates and as the value
    /// kept when the file cannot be read. Never copied into `payload`
    /// unless the read fails.
    pub stored: Option<Vec<u8>>,
    /// Set once the file's content is safe in `payload`, either read
    /// from disk or carried over from `stored`. A file is only deleted
    /// when this holds.
    pub captured: bool,
}

impl Record {
    /// Record for a file found on disk.
    pub fn from_file(path: NormalizedPath, depth: usize, included: bool) -> Self {
        Self {
            path,
            depth,
            action: Action::for_file(included),
            payload: Vec::new(),
            stored: None,
            captured: false,
        }
    }

    /// Record for a database line whose file is not on disk.
    pub fn from_stored(path: NormalizedPath, payload: Vec<u8>, included: bool) -> Self {
        Self {
            depth: path.depth(),
            path,
            action: Action::for_stored(included),
            payload,
            stored: None,
            captured: false,
        }
    }

    /// Order in which records are handed to the action handlers.
    pub fn execution_order(a: &Record, b: &Record) -> Ordering {
        (a.action, a.depth, &a.path).cmp(&(b.action, b.depth, &b.path))
    }

    /// Order in which records are written to the database.
    pub fn output_order(a: &Record, b: &Record) -> Ordering {
        (a.depth, &a.path).cmp(&(b.depth, &b.path))
    }
}
