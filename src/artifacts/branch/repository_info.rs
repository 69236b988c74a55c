use crate::artifacts::branch::branch_record::BranchRecord;
use derive_new::new;
use std::path::{Path, PathBuf};

/// Snapshot of one repository's branches, built fresh for every pass.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct RepositoryInfo {
    root_path: PathBuf,
    current_branch: String,
    current_tracking: Option<String>,
    branches: Vec<BranchRecord>,
}

impl RepositoryInfo {
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn current_branch(&self) -> &str {
        &self.current_branch
    }

    pub fn current_tracking(&self) -> Option<&str> {
        self.current_tracking.as_deref()
    }

    /// Branches in the order git listed them.
    pub fn branches(&self) -> &[BranchRecord] {
        &self.branches
    }

    pub fn active_branch(&self) -> Option<&BranchRecord> {
        self.branches.iter().find(|branch| branch.is_active)
    }

    /// Last path segment of the root, used as the repository heading.
    pub fn display_name(&self) -> String {
        self.root_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.root_path.display().to_string())
    }
}
