//! Configuration: policy files and per-run settings

mod policy;
mod run;

pub use policy::{Policy, PolicySource, RuleSpec};
pub use run::{PolicyLocator, RunConfig, default_root, resolve_root};
