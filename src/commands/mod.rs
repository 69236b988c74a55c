//! Command implementations
//!
//! Each command is an `impl` block on [`crate::areas::overview::Overview`]:
//!
//! - `sync`: Update the outline from every configured repository
//! - `branches`: Print the parsed branch listing of one repository
//! - `status`: Run the status command for the repository at an outline line

pub mod branches;
pub mod status;
pub mod sync;
