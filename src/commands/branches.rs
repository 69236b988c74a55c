use crate::areas::collector::BranchListCollector;
use crate::areas::git::GitRunner;
use crate::areas::overview::Overview;
use crate::artifacts::branch::branch_record::BranchRecord;
use crate::artifacts::branch::repository_info::RepositoryInfo;
use anyhow::Context;
use colored::Colorize;
use std::io::Write;
use std::path::Path;

impl Overview {
    /// Prints the branches of the repository containing `path`.
    pub fn branches(&self, path: &Path) -> anyhow::Result<RepositoryInfo> {
        let root = self
            .git()
            .resolve_root(path)
            .with_context(|| format!("{} is not inside a git repository", path.display()))?;
        let info = BranchListCollector::new(self.git())
            .collect(&root)
            .with_context(|| format!("failed to list branches of {}", root.display()))?;

        writeln!(self.writer(), "{}", info.root_path().display().to_string().bold())?;

        let width = info
            .branches()
            .iter()
            .map(|branch| branch.name.len())
            .max()
            .unwrap_or(0);

        for branch in info.branches() {
            let marker = if branch.is_active { "*" } else { " " };
            let name = format!("{:width$}", branch.name, width = width);
            let name = if branch.is_active {
                name.green()
            } else {
                name.normal()
            };

            writeln!(
                self.writer(),
                "{marker} {name} {} {}",
                branch.commit_hash.yellow(),
                Self::describe_tracking(branch)
            )?;
        }

        Ok(info)
    }

    fn describe_tracking(branch: &BranchRecord) -> String {
        let Some(upstream) = branch.upstream() else {
            return String::new();
        };

        if branch.is_gone() {
            return format!("[{}: {}]", upstream.blue(), "gone".red());
        }

        let counts = [("ahead", branch.ahead()), ("behind", branch.behind())]
            .into_iter()
            .filter_map(|(label, count)| count.map(|count| format!("{label} {count}")))
            .collect::<Vec<_>>();

        if counts.is_empty() {
            format!("[{}]", upstream.blue())
        } else {
            format!("[{}: {}]", upstream.blue(), counts.join(", ").red())
        }
    }
}
