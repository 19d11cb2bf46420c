//! Command implementations for tplsync-cli

pub mod explain;
pub mod sync;

pub use explain::run_explain;
pub use sync::run_sync;
