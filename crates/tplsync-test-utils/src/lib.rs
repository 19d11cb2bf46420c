//! Shared test utilities for the tplsync workspace.
//!
//! - [`tree::TestTree`] builds a scratch template root with its database
//!   and a separate directory for policy files.

pub mod tree;

pub use tree::TestTree;
