//! Keeping outline subtrees in step with repository state
//!
//! Property names below are the identity keys and attributes written to the
//! outline. `Gitdir` identifies a repository node, `Branch` a branch node.

pub mod synchronizer;

pub const GITDIR_PROPERTY: &str = "Gitdir";
pub const CURRENT_PROPERTY: &str = "Current";
pub const UPSTREAM_PROPERTY: &str = "Upstream";

pub const BRANCH_PROPERTY: &str = "Branch";
pub const COMMIT_PROPERTY: &str = "Commit";
pub const TRACKS_PROPERTY: &str = "Tracks";
pub const AHEAD_PROPERTY: &str = "Ahead";
pub const BEHIND_PROPERTY: &str = "Behind";
