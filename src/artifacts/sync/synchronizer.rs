use crate::artifacts::branch::branch_record::BranchRecord;
use crate::artifacts::branch::repository_info::RepositoryInfo;
use crate::artifacts::outline::document::{Document, NodeId};
use crate::artifacts::sync::{
    AHEAD_PROPERTY, BEHIND_PROPERTY, BRANCH_PROPERTY, COMMIT_PROPERTY, TRACKS_PROPERTY,
};
use std::collections::{HashMap, HashSet};

/// What one synchronization pass did to a repository subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub updated: Vec<String>,
    pub inserted: Vec<String>,
    /// Branch nodes whose branch no longer exists; left untouched.
    pub stale: Vec<String>,
    /// Later nodes carrying a branch name that an earlier node already matched.
    pub duplicates: Vec<String>,
}

/// Reconciles a repository subtree with a fresh [`RepositoryInfo`].
///
/// Existing branch nodes are matched by their `Branch` property, updated in
/// place and never moved or deleted. Branches without a node are appended at
/// the end of the subtree in listing order.
pub struct OutlineSynchronizer;

impl OutlineSynchronizer {
    pub fn synchronize<D: Document + ?Sized>(
        document: &mut D,
        subtree: NodeId,
        info: &RepositoryInfo,
    ) -> SyncReport {
        let mut report = SyncReport::default();
        let mut pending = info
            .branches()
            .iter()
            .map(|record| (record.name.as_str(), record))
            .collect::<HashMap<_, _>>();
        let mut matched = HashSet::new();

        for node in document.descendants(subtree) {
            let Some(name) = document.property(node, BRANCH_PROPERTY).map(str::to_string) else {
                continue;
            };

            match pending.remove(name.as_str()) {
                Some(record) => {
                    Self::apply(document, node, record);
                    matched.insert(name.clone());
                    report.updated.push(name);
                }
                None if matched.contains(&name) => {
                    tracing::warn!(
                        repository = %info.root_path().display(),
                        branch = %name,
                        "duplicate branch node left unchanged"
                    );
                    report.duplicates.push(name);
                }
                None => {
                    tracing::debug!(branch = %name, "branch no longer exists, keeping node");
                    report.stale.push(name);
                }
            }
        }

        let level = document.level(subtree) + 1;
        for record in info.branches() {
            if pending.remove(record.name.as_str()).is_none() {
                continue;
            }

            let node = document.append_child(subtree, &record.name, level);
            Self::apply(document, node, record);
            report.inserted.push(record.name.clone());
        }

        report
    }

    fn apply<D: Document + ?Sized>(document: &mut D, node: NodeId, record: &BranchRecord) {
        let ahead = record.ahead().map(|count| count.to_string());
        let behind = record.behind().map(|count| count.to_string());

        assign_property(document, node, BRANCH_PROPERTY, Some(record.name.as_str()));
        assign_property(document, node, COMMIT_PROPERTY, Some(record.commit_hash.as_str()));
        assign_property(document, node, TRACKS_PROPERTY, record.upstream());
        assign_property(document, node, AHEAD_PROPERTY, ahead.as_deref());
        assign_property(document, node, BEHIND_PROPERTY, behind.as_deref());

        let attention = record.has_diverged();
        if document.needs_attention(node) != attention {
            document.set_needs_attention(node, attention);
        }
    }
}

/// Set `key` when a value is present, remove it otherwise; untouched when
/// the node already agrees.
pub(crate) fn assign_property<D: Document + ?Sized>(
    document: &mut D,
    node: NodeId,
    key: &str,
    value: Option<&str>,
) {
    match value {
        Some(value) => {
            if document.property(node, key) != Some(value) {
                document.set_property(node, key, value);
            }
        }
        None => {
            if document.property(node, key).is_some() {
                document.remove_property(node, key);
            }
        }
    }
}
