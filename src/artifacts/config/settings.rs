//! Configuration loaded from a TOML file.
//!
//! Every field has a default, so a config file only needs the categories it
//! wants to track:
//!
//! ```toml
//! [outline]
//! path = "~/branches.org"
//!
//! [[category]]
//! name = "Work"
//! repositories = ["~/src/api", "~/src/web"]
//! scan = ["~/src/work"]
//! ```

use crate::errors::{OverviewError, OverviewResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR_NAME: &str = "branch-overview";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub outline: OutlineConfig,
    #[serde(default)]
    pub git: GitConfig,
    #[serde(default, rename = "category")]
    pub categories: Vec<CategoryConfig>,
}

impl Config {
    /// Loads and validates the configuration at `path`.
    ///
    /// # Errors
    ///
    /// - [`OverviewError::Io`] if the file cannot be read.
    /// - [`OverviewError::ConfigParse`] if the TOML is malformed.
    /// - [`OverviewError::InvalidCategory`] for empty or repeated category names.
    pub fn load(path: &Path) -> OverviewResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> OverviewResult<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| OverviewError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/branch-overview/config.toml`, falling back to
    /// `$HOME/.config/...`.
    pub fn default_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;

        Some(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn outline_path(&self) -> PathBuf {
        expand_home(&self.outline.path)
    }

    fn validate(&self) -> OverviewResult<()> {
        let mut seen = HashSet::new();

        for category in &self.categories {
            let name = category.name.trim();
            if name.is_empty() {
                return Err(OverviewError::InvalidCategory(
                    "category name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(name) {
                return Err(OverviewError::InvalidCategory(format!(
                    "category {name:?} is defined more than once"
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineConfig {
    #[serde(default = "default_outline_path")]
    pub path: String,
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            path: default_outline_path(),
            title: default_title(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitConfig {
    #[serde(default = "default_program")]
    pub program: String,
    /// Command run in a repository by `status`.
    #[serde(default = "default_status_command")]
    pub status_command: Vec<String>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            status_command: default_status_command(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    #[serde(default)]
    pub repositories: Vec<String>,
    /// Directories searched for repositories.
    #[serde(default)]
    pub scan: Vec<String>,
    #[serde(default = "default_scan_depth")]
    pub scan_depth: usize,
}

/// Expands a leading `~` to `$HOME`.
pub fn expand_home(path: &str) -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from);

    match (path, home) {
        ("~", Some(home)) => home,
        (path, Some(home)) if path.starts_with("~/") => home.join(&path[2..]),
        (path, _) => PathBuf::from(path),
    }
}

fn default_outline_path() -> String {
    "~/branches.org".to_string()
}

fn default_title() -> String {
    "Branches".to_string()
}

fn default_program() -> String {
    "git".to_string()
}

fn default_status_command() -> Vec<String> {
    vec!["git".to_string(), "status".to_string()]
}

fn default_scan_depth() -> usize {
    2
}
