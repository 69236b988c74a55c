//! Keeps an Org outline of the local branches of many git repositories.
//!
//! Each update pass runs `git branch -vv` in every configured repository,
//! parses the listing and merges it into the outline: one heading per
//! category, one per repository, one per branch. Branches that are ahead of
//! or behind their upstream get a `TODO` keyword. Anything the user wrote
//! into the outline is left alone.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
