//! The flat database file
//!
//! One record per line: `path,content\n`. Only the first comma is a
//! delimiter, so content may contain commas but never a newline. There
//! is no header. Blank lines and lines without a comma are skipped.

use std::borrow::Cow;

use tplsync_fs::{NormalizedPath, io};

use crate::record::Record;
use crate::{Error, Result};

/// A decoded database line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    pub path: NormalizedPath,
    pub content: Vec<u8>,
}

/// Decode database bytes into entries, in file order.
///
/// Lines whose path climbs out of the template root with a `..`
/// segment are skipped with a warning.
pub fn parse(data: &[u8]) -> Vec<StoredEntry> {
    data.split(|&b| b == b'\n')
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
        .filter_map(|line| {
            let comma = line.iter().position(|&b| b == b',')?;
            let path = decode_path(&line[..comma]);
            if path.as_str().split('/').any(|segment| segment == "..") {
                tracing::warn!("skipping database line for {}: path leaves the root", path);
                return None;
            }
            Some(StoredEntry {
                path,
                content: line[comma + 1..].to_vec(),
            })
        })
        .collect()
}

fn decode_path(bytes: &[u8]) -> NormalizedPath {
    let decoded = String::from_utf8_lossy(bytes);
    if let Cow::Owned(lossy) = &decoded {
        tracing::debug!("database path is not valid UTF-8, read as {}", lossy);
    }
    NormalizedPath::from(decoded.into_owned())
}

/// Encode records as database lines, in the order given.
pub fn serialize<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<u8> {
    let mut out = Vec::new();
    for record in records {
        out.extend_from_slice(record.path.as_str().as_bytes());
        out.push(b',');
        out.extend_from_slice(&record.payload);
        out.push(b'\n');
    }
    out
}

/// Read and decode the database at `path`.
///
/// A missing database is an empty one. A database that exists but
/// cannot be read is an error, so it is never overwritten blindly.
pub fn load(path: &NormalizedPath) -> Result<Vec<StoredEntry>> {
    if !path.exists() {
        tracing::debug!("no database at {}, starting empty", path);
        return Ok(Vec::new());
    }

    let data = io::read_bytes(path, None).map_err(|source| Error::DatabaseRead {
        path: path.to_native(),
        source,
    })?;
    let entries = parse(&data);
    tracing::debug!("loaded {} database entries from {}", entries.len(), path);
    Ok(entries)
}

/// Write encoded database bytes to `path` atomically.
pub fn save(path: &NormalizedPath, data: &[u8]) -> Result<()> {
    io::write_atomic(path, data).map_err(|source| Error::DatabaseWrite {
        path: path.to_native(),
        source,
    })
}
