//! Action handlers
//!
//! The only code that touches the content store or the run counters.
//! No handler returns an error: every I/O failure becomes a counter and
//! a warning on the report, and the record keeps the payload it had
//! before the failed operation.

use tplsync_fs::ContentStore;

use crate::engine::RunReport;
use crate::record::{Action, Record};

/// Everything a handler may touch while processing one record.
pub struct HandlerContext<'a> {
    pub store: &'a dyn ContentStore,
    pub size_limit: Option<usize>,
    pub report: &'a mut RunReport,
}

impl<'a> HandlerContext<'a> {
    pub fn new(
        store: &'a dyn ContentStore,
        size_limit: Option<usize>,
        report: &'a mut RunReport,
    ) -> Self {
        Self {
            store,
            size_limit,
            report,
        }
    }
}

/// Run the execution-pass handler for `record`.
///
/// `Remove` records are packed here like `Pack` records; their files
/// are deleted later by [`remove`], after the database is saved.
pub fn dispatch(ctx: &mut HandlerContext<'_>, record: &mut Record) {
    match record.action {
        Action::Pack | Action::Remove => pack(ctx, record),
        Action::Unpack => unpack(ctx, record),
        Action::Ignore => ignore(ctx, record),
    }
}

/// Strip every CR and LF byte; stored content is always one line.
pub fn normalize_payload(mut content: Vec<u8>) -> Vec<u8> {
    content.retain(|&b| b != b'\r' && b != b'\n');
    content
}

/// Capture the file's current content into the record.
///
/// First capture and change are counted before the empty check, so a
/// file emptied on disk still shows up as updated.
pub fn pack(ctx: &mut HandlerContext<'_>, record: &mut Record) {
    let content = match ctx.store.read(&record.path, ctx.size_limit) {
        Ok(content) => normalize_payload(content),
        Err(e) => {
            ctx.report.stats.pack_read_errors += 1;
            ctx.report
                .warn(format!("could not read {}: {}", record.path, e));
            if let Some(stored) = &record.stored {
                record.payload.clone_from(stored);
                record.captured = true;
            }
            return;
        }
    };

    let previous = record.stored.as_deref().unwrap_or(record.payload.as_slice());
    if previous.is_empty() {
        ctx.report.stats.packed += 1;
        ctx.report.action(format!("adding {}", record.path));
    } else if previous != content.as_slice() {
        ctx.report.stats.repacked += 1;
        ctx.report.action(format!("updating {}", record.path));
    }

    if content.is_empty() {
        ctx.report.stats.pack_read_errors += 1;
        ctx.report.warn(format!("{} is empty", record.path));
    }

    record.payload = content;
    record.captured = true;
}

/// Write the record's payload back onto disk.
///
/// Counted as unpacked whether or not the write succeeds.
pub fn unpack(ctx: &mut HandlerContext<'_>, record: &mut Record) {
    ctx.report.stats.unpacked += 1;
    ctx.report.action(format!("unpacking {}", record.path));

    let written = ctx
        .store
        .create_parent_dirs(&record.path)
        .and_then(|()| ctx.store.write(&record.path, &record.payload));
    if let Err(e) = written {
        ctx.report.stats.unpack_write_errors += 1;
        ctx.report
            .warn(format!("could not write {}: {}", record.path, e));
    }
}

/// Delete a file the policy no longer keeps.
///
/// Must only run after the record was packed and the database saved.
/// A file whose content was never captured is kept and reported. A
/// failed delete is tolerated.
pub fn remove(ctx: &mut HandlerContext<'_>, record: &Record) {
    if !record.captured {
        ctx.report.warn(format!(
            "keeping {}: its content could not be captured",
            record.path
        ));
        return;
    }

    ctx.report.stats.left_out += 1;
    ctx.report.action(format!("removing {}", record.path));

    if let Err(e) = ctx.store.remove(&record.path) {
        tracing::debug!("could not delete {}: {}", record.path, e);
    }
}

pub fn ignore(ctx: &mut HandlerContext<'_>, record: &Record) {
    ctx.report.stats.ignored += 1;
    tracing::debug!("ignoring {}", record.path);
}
