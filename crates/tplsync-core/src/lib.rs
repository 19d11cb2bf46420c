//! Core reconciliation engine for tplsync
//!
//! Keeps a directory tree of one-line template files and the flat
//! `templates.csv` database in agreement. Every template path ends up as
//! one [`Record`] whose [`Action`] is decided by where it was found (on
//! disk, in the database, or both) and by the [`InclusionFilter`] built
//! from the tagged policy.
//!
//! # Example
//!
//! ```no_run
//! use tplsync_core::{RunConfig, SyncEngine, resolve_root};
//!
//! let root = resolve_root(None)?;
//! let engine = SyncEngine::new(RunConfig::new(root).with_tag("pvp"))?;
//! let report = engine.run()?;
//! println!("{}", report.stats);
//! # Ok::<(), tplsync_core::Error>(())
//! ```

pub mod config;
pub mod database;
pub mod engine;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod record;
pub mod stats;
pub mod table;

pub use config::{
    Policy, PolicyLocator, PolicySource, RuleSpec, RunConfig, default_root, resolve_root,
};
pub use database::StoredEntry;
pub use engine::{Explanation, PlannedRecord, RunReport, SyncEngine};
pub use error::{Error, Result};
pub use filter::{InclusionFilter, PatternError, Polarity};
pub use record::{Action, Record};
pub use stats::RunStats;
pub use table::ReconciliationTable;
