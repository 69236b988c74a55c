//! Branch state as reported by `git branch -vv`
//!
//! - `branch_record`: one local branch and its tracking relationship
//! - `line_parser`: the line grammar turning listing output into records
//! - `repository_info`: the per-repository snapshot handed to the synchronizer

pub mod branch_record;
pub mod line_parser;
pub mod repository_info;

pub const AHEAD_KEYWORD: &str = "ahead";
pub const BEHIND_KEYWORD: &str = "behind";
pub const GONE_KEYWORD: &str = "gone";
