use crate::areas::collector::BranchListCollector;
use crate::areas::git::GitRunner;
use crate::artifacts::branch::repository_info::RepositoryInfo;
use crate::artifacts::config::settings::CategoryConfig;
use crate::artifacts::outline::ROOT_LEVEL;
use crate::artifacts::outline::document::{Document, NodeId};
use crate::artifacts::sync::synchronizer::{OutlineSynchronizer, SyncReport, assign_property};
use crate::artifacts::sync::{CURRENT_PROPERTY, GITDIR_PROPERTY, UPSTREAM_PROPERTY};
use crate::errors::{OverviewError, OverviewResult};
use derive_new::new;
use std::path::{Path, PathBuf};

/// A repository that was skipped during a pass, and why.
#[derive(Debug)]
pub struct RepositoryWarning {
    pub path: PathBuf,
    pub error: OverviewError,
}

#[derive(Debug)]
pub struct SyncedRepository {
    pub root: PathBuf,
    pub report: SyncReport,
}

#[derive(Debug, Default)]
pub struct PassReport {
    pub synced: Vec<SyncedRepository>,
    pub warnings: Vec<RepositoryWarning>,
}

impl PassReport {
    pub fn inserted_branches(&self) -> usize {
        self.synced
            .iter()
            .map(|repository| repository.report.inserted.len())
            .sum()
    }

    fn merge(&mut self, other: PassReport) {
        self.synced.extend(other.synced);
        self.warnings.extend(other.warnings);
    }
}

/// Drives a whole update pass over the outline.
///
/// Repositories are handled one at a time. Everything about a repository is
/// collected before its subtree is touched, and a failing repository is
/// recorded as a warning without stopping the pass.
#[derive(new)]
pub struct OverviewBuilder<'g, G: GitRunner + ?Sized> {
    git: &'g G,
}

impl<'g, G: GitRunner + ?Sized> OverviewBuilder<'g, G> {
    pub fn update_all<D: Document + ?Sized>(
        &self,
        document: &mut D,
        categories: &[CategoryConfig],
    ) -> PassReport {
        let mut report = PassReport::default();

        for category in categories {
            let roots = category.resolve_roots();
            report.merge(self.update_category(document, &category.name, &roots));
        }

        report
    }

    pub fn update_category<D: Document + ?Sized>(
        &self,
        document: &mut D,
        category: &str,
        roots: &[PathBuf],
    ) -> PassReport {
        let mut report = PassReport::default();
        let heading = Self::category_node(document, category);

        for path in roots {
            match self.update_repository(document, heading, path) {
                Ok(synced) => report.synced.push(synced),
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "skipping repository");
                    report.warnings.push(RepositoryWarning {
                        path: path.clone(),
                        error,
                    });
                }
            }
        }

        report
    }

    fn update_repository<D: Document + ?Sized>(
        &self,
        document: &mut D,
        category: NodeId,
        path: &Path,
    ) -> OverviewResult<SyncedRepository> {
        let root = self.git.resolve_root(path)?;
        let info = BranchListCollector::new(self.git).collect(&root)?;

        let node = Self::repository_node(document, category, &info);
        let report = OutlineSynchronizer::synchronize(document, node, &info);

        tracing::info!(
            root = %root.display(),
            updated = report.updated.len(),
            inserted = report.inserted.len(),
            "synchronized repository"
        );

        Ok(SyncedRepository { root, report })
    }

    fn category_node<D: Document + ?Sized>(document: &mut D, name: &str) -> NodeId {
        let root = document.root();
        let existing = document
            .children(root)
            .iter()
            .copied()
            .find(|&node| document.heading(node) == name);

        match existing {
            Some(node) => node,
            None => document.append_child(root, name, ROOT_LEVEL + 1),
        }
    }

    /// Node carrying the repository's `Gitdir` anywhere in the document, or a
    /// new heading under `category`.
    fn repository_node<D: Document + ?Sized>(
        document: &mut D,
        category: NodeId,
        info: &RepositoryInfo,
    ) -> NodeId {
        let gitdir = info.root_path().display().to_string();

        let node = match document.find_by_property(GITDIR_PROPERTY, &gitdir) {
            Some(node) => node,
            None => {
                let level = document.level(category) + 1;
                document.append_child(category, &info.display_name(), level)
            }
        };

        assign_property(document, node, GITDIR_PROPERTY, Some(gitdir.as_str()));
        assign_property(
            document,
            node,
            CURRENT_PROPERTY,
            Some(info.current_branch()),
        );
        assign_property(document, node, UPSTREAM_PROPERTY, info.current_tracking());

        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::areas::git::testing::ScriptedGit;
    use crate::artifacts::outline::org;
    use crate::artifacts::outline::outline::Outline;
    use pretty_assertions::assert_eq;

    fn script_repository(git: &mut ScriptedGit, root: &str, listing: &str) {
        git.repository(root)
            .respond(root, &["branch", "-vv", "--no-color"], 0, listing)
            .respond(root, &["symbolic-ref", "--short", "-q", "HEAD"], 0, "main\n")
            .respond(
                root,
                &[
                    "rev-parse",
                    "--abbrev-ref",
                    "--symbolic-full-name",
                    "@{upstream}",
                ],
                0,
                "origin/main\n",
            );
    }

    fn three_repositories() -> ScriptedGit {
        let mut git = ScriptedGit::default();
        script_repository(&mut git, "/src/r1", "* main abc1234 [origin/main] one\n");
        git.repository("/src/r2")
            .respond("/src/r2", &["branch", "-vv", "--no-color"], 128, "");
        script_repository(
            &mut git,
            "/src/r3",
            "* main abc1234 [origin/main: behind 2] three\n  topic 1234567 local\n",
        );
        git
    }

    fn roots() -> Vec<PathBuf> {
        ["/src/r1", "/src/r2", "/src/r3"]
            .into_iter()
            .map(PathBuf::from)
            .collect()
    }

    #[test]
    fn failing_repository_is_isolated() {
        let git = three_repositories();
        let mut outline = Outline::new();

        let report = OverviewBuilder::new(&git).update_category(&mut outline, "Work", &roots());

        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].path, PathBuf::from("/src/r2"));
        assert!(matches!(
            report.warnings[0].error,
            OverviewError::ExternalTool { .. }
        ));
        assert_eq!(
            report
                .synced
                .iter()
                .map(|repository| repository.root.clone())
                .collect::<Vec<_>>(),
            vec![PathBuf::from("/src/r1"), PathBuf::from("/src/r3")]
        );

        let r3 = outline
            .find_by_property("Gitdir", "/src/r3")
            .expect("r3 should have a node");
        assert_eq!(outline.heading(r3), "r3");
        assert_eq!(outline.children(r3).len(), 2);
        assert_eq!(outline.find_by_property("Gitdir", "/src/r2"), None);
    }

    #[test]
    fn builds_category_and_repository_headings() {
        let git = three_repositories();
        let mut outline = Outline::new();

        OverviewBuilder::new(&git).update_category(&mut outline, "Work", &roots());

        let expected = "\
* Work
** r1
:PROPERTIES:
:Gitdir: /src/r1
:Current: main
:Upstream: origin/main
:END:
*** main
:PROPERTIES:
:Branch: main
:Commit: abc1234
:Tracks: origin/main
:END:
** r3
:PROPERTIES:
:Gitdir: /src/r3
:Current: main
:Upstream: origin/main
:END:
*** TODO main
:PROPERTIES:
:Branch: main
:Commit: abc1234
:Tracks: origin/main
:Behind: 2
:END:
*** topic
:PROPERTIES:
:Branch: topic
:Commit: 1234567
:END:
";
        assert_eq!(org::render(&outline), expected);
    }

    #[test]
    fn repeated_pass_reuses_existing_nodes() {
        let git = three_repositories();
        let mut outline = Outline::new();
        let builder = OverviewBuilder::new(&git);

        builder.update_category(&mut outline, "Work", &roots());
        let first = org::render(&outline);
        builder.update_category(&mut outline, "Work", &roots());

        assert_eq!(org::render(&outline), first);
        assert_eq!(outline.children(outline.root()).len(), 1);
    }

    #[test]
    fn repository_moved_by_hand_is_found_by_gitdir() {
        let git = three_repositories();
        let mut outline = Outline::new();
        let root = outline.root();
        let elsewhere = outline.append_child(root, "Archive", 1);
        let moved = outline.append_child(elsewhere, "first repo", 2);
        outline.set_property(moved, "Gitdir", "/src/r1");

        OverviewBuilder::new(&git).update_category(&mut outline, "Work", &roots());

        let work = outline.children(root)[1];
        assert_eq!(outline.heading(work), "Work");
        assert_eq!(outline.children(work).len(), 1);
        assert_eq!(outline.children(moved).len(), 1);
        assert_eq!(outline.property(moved, "Current"), Some("main"));
    }

    #[test]
    fn unknown_path_is_reported_as_not_found() {
        let git = ScriptedGit::default();
        let mut outline = Outline::new();

        let report = OverviewBuilder::new(&git).update_category(
            &mut outline,
            "Work",
            &[PathBuf::from("/nowhere")],
        );

        assert!(matches!(
            report.warnings[0].error,
            OverviewError::RepositoryNotFound(_)
        ));
        assert_eq!(outline.len(), 1);
    }
}
