//! Content store used by the reconciliation handlers.
//!
//! The store is the only way the engine touches template files. Paths
//! handed to it are relative to the template root.

use crate::{NormalizedPath, Result, io};

/// Reads and writes template content addressed by root-relative path.
pub trait ContentStore {
    /// Read the whole file at `path`.
    ///
    /// Fails when the file is larger than `size_limit` (if given) or on
    /// any OS-level read failure.
    fn read(&self, path: &NormalizedPath, size_limit: Option<usize>) -> Result<Vec<u8>>;

    /// Replace the content of the file at `path`.
    fn write(&self, path: &NormalizedPath, content: &[u8]) -> Result<()>;

    /// Create the directories leading up to `path`.
    fn create_parent_dirs(&self, path: &NormalizedPath) -> Result<()>;

    /// Delete the file at `path`.
    fn remove(&self, path: &NormalizedPath) -> Result<()>;
}

/// [`ContentStore`] backed by a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: NormalizedPath,
}

impl FsContentStore {
    pub fn new(root: NormalizedPath) -> Self {
        Self { root }
    }

    fn resolve(&self, path: &NormalizedPath) -> NormalizedPath {
        self.root.join(path.as_str())
    }
}

impl ContentStore for FsContentStore {
    fn read(&self, path: &NormalizedPath, size_limit: Option<usize>) -> Result<Vec<u8>> {
        io::read_bytes(&self.resolve(path), size_limit)
    }

    fn write(&self, path: &NormalizedPath, content: &[u8]) -> Result<()> {
        io::write_bytes(&self.resolve(path), content)
    }

    fn create_parent_dirs(&self, path: &NormalizedPath) -> Result<()> {
        io::create_parent_dirs(&self.resolve(path))
    }

    fn remove(&self, path: &NormalizedPath) -> Result<()> {
        io::remove_file(&self.resolve(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_fs_store_round_trip_under_root() {
        let temp = TempDir::new().unwrap();
        let store = FsContentStore::new(NormalizedPath::new(temp.path()));
        let rel = NormalizedPath::from("pvp/monk.txt");

        store.create_parent_dirs(&rel).unwrap();
        store.write(&rel, b"OwVT").unwrap();

        assert_eq!(
            fs::read(temp.path().join("pvp").join("monk.txt")).unwrap(),
            b"OwVT"
        );
        assert_eq!(store.read(&rel, None).unwrap(), b"OwVT");

        store.remove(&rel).unwrap();
        assert!(!temp.path().join("pvp").join("monk.txt").exists());
    }

    #[test]
    fn test_fs_store_write_without_parent_fails() {
        let temp = TempDir::new().unwrap();
        let store = FsContentStore::new(NormalizedPath::new(temp.path()));

        let result = store.write(&NormalizedPath::from("missing/a.txt"), b"x");
        assert!(result.is_err());
    }
}
