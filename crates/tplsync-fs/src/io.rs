//! Whole-file I/O operations

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};

use crate::{Error, NormalizedPath, Result};

/// Write content atomically to a file.
///
/// Uses write-to-temp-then-rename so a reader never observes a
/// half-written file. No lock is taken: tplsync assumes a single writer.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    // Ensure parent directory exists
    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file in the same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let write_temp = || -> std::io::Result<()> {
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        temp_file.write_all(content)?;
        temp_file.sync_all()
    };
    if let Err(e) = write_temp() {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&temp_path, e));
    }

    fs::rename(&temp_path, &native_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        Error::io(&native_path, e)
    })?;

    Ok(())
}

/// Read a whole file into memory.
///
/// When `size_limit` is given, files larger than the limit are rejected
/// before any content is read.
pub fn read_bytes(path: &NormalizedPath, size_limit: Option<usize>) -> Result<Vec<u8>> {
    let native_path = path.to_native();
    let mut file = File::open(&native_path).map_err(|e| Error::io(&native_path, e))?;

    let size = file
        .metadata()
        .map_err(|e| Error::io(&native_path, e))?
        .len();
    if let Some(limit) = size_limit
        && size > limit as u64
    {
        return Err(Error::SizeLimitExceeded {
            path: native_path,
            size,
            limit,
        });
    }

    let mut content = Vec::with_capacity(size as usize);
    file.read_to_end(&mut content)
        .map_err(|e| Error::io(&native_path, e))?;
    Ok(content)
}

/// Write a whole file, replacing any previous content.
///
/// The parent directory must already exist.
pub fn write_bytes(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();
    let mut file = File::create(&native_path).map_err(|e| Error::io(&native_path, e))?;
    file.write_all(content)
        .map_err(|e| Error::io(&native_path, e))?;
    file.flush().map_err(|e| Error::io(&native_path, e))
}

/// Create every missing directory leading up to `path`.
pub fn create_parent_dirs(path: &NormalizedPath) -> Result<()> {
    let native_path = path.to_native();
    match native_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))
        }
        _ => Ok(()),
    }
}

/// Delete a single file.
pub fn remove_file(path: &NormalizedPath) -> Result<()> {
    let native_path = path.to_native();
    fs::remove_file(&native_path).map_err(|e| Error::io(&native_path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_bytes_within_limit() {
        let dir = tempdir().unwrap();
        let path = NormalizedPath::new(dir.path().join("a.txt"));
        fs::write(path.to_native(), b"12345").unwrap();

        assert_eq!(read_bytes(&path, Some(5)).unwrap(), b"12345");
        assert_eq!(read_bytes(&path, None).unwrap(), b"12345");
    }

    #[test]
    fn test_read_bytes_over_limit() {
        let dir = tempdir().unwrap();
        let path = NormalizedPath::new(dir.path().join("a.txt"));
        fs::write(path.to_native(), b"123456").unwrap();

        let err = read_bytes(&path, Some(5)).unwrap_err();
        assert!(matches!(
            err,
            Error::SizeLimitExceeded {
                size: 6,
                limit: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_create_parent_dirs_for_nested_path() {
        let dir = tempdir().unwrap();
        let path = NormalizedPath::new(dir.path()).join("a/b/c.txt");

        create_parent_dirs(&path).unwrap();

        assert!(dir.path().join("a").join("b").is_dir());
        assert!(!dir.path().join("a").join("b").join("c.txt").exists());
    }
}
