//! Stateful components
//!
//! - `git`: Running the external `git` binary
//! - `collector`: Turning `git branch -vv` output into repository snapshots
//! - `builder`: Update passes over categories and repositories
//! - `outline_file`: Loading and storing the outline under a file lock
//! - `overview`: The context shared by every command

pub mod builder;
pub mod collector;
pub mod git;
pub mod outline_file;
pub mod overview;
