//! User configuration
//!
//! - `settings`: the TOML file layout and its defaults
//! - `discovery`: turning a category into the repository paths to visit

pub mod discovery;
pub mod settings;
