//! Data structures and algorithms
//!
//! - `branch`: Branch records and the `git branch -vv` line grammar
//! - `config`: TOML configuration and repository discovery
//! - `outline`: The outline tree, its `Document` interface and the Org format
//! - `sync`: Reconciling a repository subtree with collected branch data

pub mod branch;
pub mod config;
pub mod outline;
pub mod sync;
