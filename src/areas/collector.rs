use crate::areas::git::{GitRunner, describe};
use crate::artifacts::branch::branch_record::BranchRecord;
use crate::artifacts::branch::line_parser::BranchLineParser;
use crate::artifacts::branch::repository_info::RepositoryInfo;
use crate::errors::{OverviewError, OverviewResult};
use derive_new::new;
use std::path::Path;

const LIST_BRANCHES: &[&str] = &["branch", "-vv", "--no-color"];
const CURRENT_BRANCH: &[&str] = &["symbolic-ref", "--short", "-q", "HEAD"];
const CURRENT_TRACKING: &[&str] = &[
    "rev-parse",
    "--abbrev-ref",
    "--symbolic-full-name",
    "@{upstream}",
];

/// `symbolic-ref -q` exits with 1 when HEAD is detached.
const DETACHED_EXIT_CODE: i32 = 1;

/// Builds a [`RepositoryInfo`] from `git branch -vv`.
///
/// The whole listing must parse; a line the grammar does not recognise means
/// the installed git prints something we do not understand, and the
/// repository is rejected instead of half-read.
#[derive(new)]
pub struct BranchListCollector<'g, G: GitRunner + ?Sized> {
    git: &'g G,
}

impl<'g, G: GitRunner + ?Sized> BranchListCollector<'g, G> {
    pub fn collect(&self, root: &Path) -> OverviewResult<RepositoryInfo> {
        let listing = self.git.run(root, LIST_BRANCHES)?;
        if !listing.success() {
            return Err(OverviewError::ExternalTool {
                command: describe("git", LIST_BRANCHES),
                code: listing.code,
                stderr: listing.stderr.trim().to_string(),
            });
        }

        let branches = Self::parse_listing(&listing.stdout)?;
        let current_branch = self.current_branch(root, &branches)?;
        let current_tracking = self.current_tracking(root)?;

        tracing::debug!(
            root = %root.display(),
            branches = branches.len(),
            current = %current_branch,
            "collected branches"
        );

        Ok(RepositoryInfo::new(
            root.to_path_buf(),
            current_branch,
            current_tracking,
            branches,
        ))
    }

    pub fn parse_listing(output: &str) -> OverviewResult<Vec<BranchRecord>> {
        output
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                BranchLineParser::parse(line)?.ok_or_else(|| OverviewError::UnexpectedOutput {
                    line_number: index + 1,
                    line: line.to_string(),
                })
            })
            .collect()
    }

    fn current_branch(&self, root: &Path, branches: &[BranchRecord]) -> OverviewResult<String> {
        let output = self.git.run(root, CURRENT_BRANCH)?;
        let name = output.stdout.trim();

        match output.code {
            Some(0) if !name.is_empty() => Ok(name.to_string()),
            Some(0) | Some(DETACHED_EXIT_CODE) => Ok(branches
                .iter()
                .find(|branch| branch.is_active)
                .map(|branch| branch.name.clone())
                .unwrap_or_else(|| "HEAD".to_string())),
            code => Err(OverviewError::ExternalTool {
                command: describe("git", CURRENT_BRANCH),
                code,
                stderr: output.stderr.trim().to_string(),
            }),
        }
    }

    fn current_tracking(&self, root: &Path) -> OverviewResult<Option<String>> {
        let output = self.git.run(root, CURRENT_TRACKING)?;
        let upstream = output.stdout.trim();

        Ok((output.success() && !upstream.is_empty()).then(|| upstream.to_string()))
    }
}
