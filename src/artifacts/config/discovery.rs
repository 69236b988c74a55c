use crate::artifacts::config::settings::{CategoryConfig, expand_home};
use std::collections::HashSet;
use std::path::PathBuf;
use walkdir::WalkDir;

const GIT_DIR_NAME: &str = ".git";

impl CategoryConfig {
    /// Paths to visit for this category: the listed repositories first, then
    /// every work tree found below the `scan` directories, without repeats.
    pub fn resolve_roots(&self) -> Vec<PathBuf> {
        let listed = self.repositories.iter().map(|path| expand_home(path));
        let scanned = self
            .scan
            .iter()
            .flat_map(|dir| discover_repositories(expand_home(dir), self.scan_depth));

        let mut seen = HashSet::new();
        listed
            .chain(scanned)
            .filter(|path| seen.insert(path.clone()))
            .collect()
    }
}

/// Work trees at most `depth` levels below `dir`, in file name order.
fn discover_repositories(dir: PathBuf, depth: usize) -> Vec<PathBuf> {
    WalkDir::new(&dir)
        .min_depth(1)
        .max_depth(depth + 1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::debug!(dir = %dir.display(), %error, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_name() == GIT_DIR_NAME)
        .filter_map(|entry| entry.path().parent().map(PathBuf::from))
        .filter(|repository| repository != &dir)
        .collect()
}
