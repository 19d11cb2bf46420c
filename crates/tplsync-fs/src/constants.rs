//! Well-known file names used by tplsync.

use std::path::Path;

/// Suffix a file name must end with to take part in reconciliation.
///
/// Matched case-sensitively against the whole file name.
pub const TEMPLATE_SUFFIX: &str = ".txt";

/// Standard tplsync file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorePath {
    /// The aggregated database, stored at the template root
    Database,
    /// INI policy file name
    PolicyIni,
    /// TOML policy file name
    PolicyToml,
    /// Per-user configuration directory name
    ConfigDir,
}

impl StorePath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Database => "templates.csv",
            Self::PolicyIni => "tplsync.ini",
            Self::PolicyToml => "tplsync.toml",
            Self::ConfigDir => "tplsync",
        }
    }
}

impl AsRef<Path> for StorePath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for StorePath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for StorePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Check whether a file name carries the template suffix.
pub fn is_template_name(name: &str) -> bool {
    name.ends_with(TEMPLATE_SUFFIX)
}
