//! Filesystem abstraction for tplsync
//!
//! Provides forward-slash path handling, the content store used by the
//! reconciliation handlers, and the directory scan/prune passes.

pub mod constants;
pub mod error;
pub mod io;
pub mod path;
pub mod store;
pub mod walk;

pub use constants::{StorePath, TEMPLATE_SUFFIX};
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use store::{ContentStore, FsContentStore};
pub use walk::{ScannedFile, prune_empty_dirs, scan_templates};
