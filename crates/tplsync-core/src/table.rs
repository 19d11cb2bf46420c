//! The reconciliation table
//!
//! Holds one [`Record`] per path for a single run. Records live in an
//! arena and are addressed by index; a path index guarantees there is
//! never more than one record per path. The arena itself is never
//! reordered, the execution and output passes walk sorted index lists
//! instead.

use std::collections::HashMap;

use tplsync_fs::{NormalizedPath, ScannedFile};

use crate::database::{self, StoredEntry};
use crate::filter::InclusionFilter;
use crate::handlers::{self, HandlerContext};
use crate::record::{Action, Record};

#[derive(Debug, Clone, Default)]
pub struct ReconciliationTable {
    records: Vec<Record>,
    index: HashMap<NormalizedPath, usize>,
}

impl ReconciliationTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, record: Record) {
        self.index.insert(record.path.clone(), self.records.len());
        self.records.push(record);
    }

    /// Filesystem pass: one `Pack` or `Remove` record per file.
    pub fn add_files(&mut self, files: &[ScannedFile], filter: &InclusionFilter) {
        for file in files {
            if self.index.contains_key(&file.path) {
                tracing::warn!("duplicate scan entry for {}", file.path);
                continue;
            }
            let included = filter.decide(file.path.as_str());
            self.insert(Record::from_file(file.path.clone(), file.depth, included));
        }
    }

    /// Database pass: complete or create records from stored lines.
    ///
    /// A path already found on disk keeps its action and its file stays
    /// the source of truth; the stored line is only kept aside on
    /// [`Record::stored`]. A path not on disk becomes an `Unpack` or
    /// `Ignore` record carrying the stored content. When the database
    /// repeats a path, the later line wins.
    pub fn merge_stored(&mut self, entries: Vec<StoredEntry>, filter: &InclusionFilter) {
        for entry in entries {
            match self.index.get(&entry.path) {
                Some(&idx) => {
                    let record = &mut self.records[idx];
                    match record.action {
                        Action::Pack | Action::Remove => record.stored = Some(entry.content),
                        Action::Unpack | Action::Ignore => record.payload = entry.content,
                    }
                }
                None => {
                    let included = filter.decide(entry.path.as_str());
                    self.insert(Record::from_stored(entry.path, entry.content, included));
                }
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<&Record> {
        self.index
            .get(&NormalizedPath::from(path))
            .map(|&idx| &self.records[idx])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn sorted_indices(&self, cmp: fn(&Record, &Record) -> std::cmp::Ordering) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.records.len()).collect();
        order.sort_by(|&a, &b| cmp(&self.records[a], &self.records[b]));
        order
    }

    /// Records sorted by `(action, depth, path)`.
    pub fn in_execution_order(&self) -> impl Iterator<Item = &Record> {
        self.sorted_indices(Record::execution_order)
            .into_iter()
            .map(move |idx| &self.records[idx])
    }

    /// Records sorted by `(depth, path)`.
    pub fn in_output_order(&self) -> impl Iterator<Item = &Record> {
        self.sorted_indices(Record::output_order)
            .into_iter()
            .map(move |idx| &self.records[idx])
    }

    /// Execution pass: hand every record to its action handler.
    pub fn execute(&mut self, ctx: &mut HandlerContext<'_>) {
        for idx in self.sorted_indices(Record::execution_order) {
            handlers::dispatch(ctx, &mut self.records[idx]);
        }
    }

    /// Serialization pass: every record, whatever its action.
    pub fn serialize(&self) -> Vec<u8> {
        database::serialize(self.in_output_order())
    }

    /// Deletion pass: delete the files of captured `Remove` records.
    ///
    /// Only call after [`Self::serialize`] output has been saved. Files
    /// whose content never reached the database stay on disk.
    pub fn remove_dropped(&self, ctx: &mut HandlerContext<'_>) {
        for record in self.in_output_order() {
            if record.action == Action::Remove {
                handlers::remove(ctx, record);
            }
        }
    }
}
