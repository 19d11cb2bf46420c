//! Run counters

use serde::{Deserialize, Serialize};

/// Aggregate counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Files captured for the first time
    pub packed: usize,
    /// Files whose content changed since the database was written
    pub repacked: usize,
    /// Database lines written back to disk (attempts, including failures)
    pub unpacked: usize,
    /// Database lines left dormant by the policy
    pub ignored: usize,
    /// Files captured and then deleted because the policy drops them
    pub left_out: usize,
    pub pack_read_errors: usize,
    pub unpack_write_errors: usize,
}

impl RunStats {
    pub fn errors(&self) -> usize {
        self.pack_read_errors + self.unpack_write_errors
    }
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} template(s) packed, {} repacked, {} unpacked, {} left out",
            self.packed, self.repacked, self.unpacked, self.left_out
        )
    }
}
