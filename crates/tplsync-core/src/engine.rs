//! SyncEngine implementation
//!
//! The SyncEngine runs one reconciliation between the template tree and
//! the database file. A run is a fixed sequence of passes:
//!
//! 1. scan the tree, one record per template file
//! 2. merge the database lines
//! 3. execute every record in `(action, depth, path)` order
//! 4. save the database
//! 5. delete the files the policy drops
//! 6. prune empty directories
//!
//! Setup failures (root, policy, database read/write) abort the run.
//! Everything after setup is per-record and only ever shows up in the
//! returned [`RunReport`].

use serde::{Deserialize, Serialize};
use tplsync_fs::{ContentStore, FsContentStore, NormalizedPath, prune_empty_dirs, scan_templates};

use crate::config::{Policy, PolicySource, RunConfig};
use crate::database;
use crate::filter::{InclusionFilter, PatternError, Polarity};
use crate::handlers::HandlerContext;
use crate::record::Action;
use crate::stats::RunStats;
use crate::table::ReconciliationTable;
use crate::{Error, Result};

/// Outcome of a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// Counters for the run
    pub stats: RunStats,
    /// Human-readable actions taken, in order
    pub actions: Vec<String>,
    /// Rejected patterns and per-record failures
    pub warnings: Vec<String>,
    /// Empty directories removed after the deletion pass
    pub pruned_dirs: usize,
}

impl RunReport {
    /// Record an action and log it.
    pub fn action(&mut self, action: String) {
        tracing::info!("{}", action);
        self.actions.push(action);
    }

    /// Record a warning and log it.
    pub fn warn(&mut self, warning: String) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// True when no record failed.
    pub fn is_clean(&self) -> bool {
        self.stats.errors() == 0
    }
}

/// A record as classified by [`SyncEngine::plan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedRecord {
    pub path: String,
    pub action: Action,
}

/// The filter decision for one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub path: NormalizedPath,
    pub included: bool,
    /// The last matching rule, `None` when the default applied
    pub rule: Option<(String, Polarity)>,
}

/// Engine for reconciling a template tree with its database
pub struct SyncEngine {
    config: RunConfig,
    filter: InclusionFilter,
    rejected: Vec<PatternError>,
    policy_found: bool,
    store: Box<dyn ContentStore>,
}

impl SyncEngine {
    /// Create an engine, loading the policy file named by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy file cannot be read, has an
    /// unsupported extension, or fails to parse.
    pub fn new(config: RunConfig) -> Result<Self> {
        match config.policy_file.clone() {
            Some(path) => {
                let policy = Policy::load(&path)?;
                tracing::debug!("loaded policy from {}", path);
                Ok(Self::with_policy(config, &policy))
            }
            None => {
                let mut engine = Self::with_policy(config, &Policy::default());
                engine.policy_found = false;
                Ok(engine)
            }
        }
    }

    /// Create an engine from an already loaded policy.
    pub fn with_policy(config: RunConfig, policy: &dyn PolicySource) -> Self {
        let (filter, rejected) = policy.build_filter(&config.tag);
        let store = Box::new(FsContentStore::new(config.root.clone()));
        Self {
            config,
            filter,
            rejected,
            policy_found: true,
            store,
        }
    }

    /// Replace the content store (used for testing).
    pub fn with_store(mut self, store: Box<dyn ContentStore>) -> Self {
        self.store = store;
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn filter(&self) -> &InclusionFilter {
        &self.filter
    }

    /// Policy rules that were skipped because their pattern is invalid.
    pub fn rejected_patterns(&self) -> &[PatternError] {
        &self.rejected
    }

    fn setup_warnings(&self, report: &mut RunReport) {
        if !self.policy_found {
            report.warn("no policy file found, every template is kept".to_string());
        }
        for rejected in &self.rejected {
            report.warn(rejected.to_string());
        }
    }

    fn build_table(&self) -> Result<ReconciliationTable> {
        let files = scan_templates(&self.config.root).map_err(|e| match e {
            tplsync_fs::Error::RootNotFound { path } => Error::RootNotFound { path },
            other => Error::Fs(other),
        })?;
        let entries = database::load(&self.config.database)?;
        tracing::debug!(
            "scanned {} template(s), {} database line(s)",
            files.len(),
            entries.len()
        );

        let mut table = ReconciliationTable::new();
        table.add_files(&files, &self.filter);
        table.merge_stored(entries, &self.filter);
        Ok(table)
    }

    /// Classify every path without touching anything.
    ///
    /// Records come back in execution order.
    pub fn plan(&self) -> Result<Vec<PlannedRecord>> {
        let table = self.build_table()?;
        Ok(table
            .in_execution_order()
            .map(|record| PlannedRecord {
                path: record.path.to_string(),
                action: record.action,
            })
            .collect())
    }

    /// Filter decision for a single path.
    pub fn explain(&self, path: &str) -> Explanation {
        let path = NormalizedPath::from(path);
        let included = self.filter.decide(path.as_str());
        let rule = self
            .filter
            .deciding_rule(path.as_str())
            .map(|(pattern, polarity)| (pattern.to_string(), polarity));
        Explanation {
            path,
            included,
            rule,
        }
    }

    /// Run the reconciliation.
    ///
    /// With `dry_run` set, only the plan is reported.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be scanned, or if the
    /// database cannot be read or written. When the database write
    /// fails, no file has been deleted.
    pub fn run(&self) -> Result<RunReport> {
        let mut report = RunReport::default();
        self.setup_warnings(&mut report);

        if self.config.dry_run {
            for planned in self.plan()? {
                report
                    .actions
                    .push(format!("[dry-run] Would {} {}", planned.action, planned.path));
            }
            return Ok(report);
        }

        let mut table = self.build_table()?;
        let store = self.store.as_ref();
        let size_limit = self.config.size_limit;

        table.execute(&mut HandlerContext::new(store, size_limit, &mut report));

        database::save(&self.config.database, &table.serialize())?;
        tracing::debug!("saved {} line(s) to {}", table.len(), self.config.database);

        table.remove_dropped(&mut HandlerContext::new(store, size_limit, &mut report));

        match prune_empty_dirs(&self.config.root) {
            Ok(count) => {
                if count > 0 {
                    tracing::debug!("pruned {} empty director(ies)", count);
                }
                report.pruned_dirs = count;
            }
            Err(e) => report.warn(format!("could not prune empty directories: {}", e)),
        }

        tracing::info!("{}", report.stats);
        Ok(report)
    }
}
