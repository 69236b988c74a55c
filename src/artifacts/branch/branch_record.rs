use derive_new::new;

/// How a local branch relates to its upstream, as reported inside the
/// bracketed tracking clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Divergence {
    /// The upstream ref was deleted on the remote.
    Gone,
    /// Counts as reported; `None` means the count was not printed at all,
    /// which is not the same fact as zero.
    Counts {
        ahead: Option<u32>,
        behind: Option<u32>,
    },
}

impl Divergence {
    pub fn in_sync() -> Self {
        Divergence::Counts {
            ahead: None,
            behind: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Tracking {
    pub upstream: String,
    pub divergence: Divergence,
}

/// One local branch as listed by `git branch -vv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRecord {
    pub name: String,
    pub is_active: bool,
    pub in_other_worktree: bool,
    pub commit_hash: String,
    pub worktree_path: Option<String>,
    pub tracking: Option<Tracking>,
}

impl BranchRecord {
    pub fn upstream(&self) -> Option<&str> {
        self.tracking.as_ref().map(|t| t.upstream.as_str())
    }

    pub fn ahead(&self) -> Option<u32> {
        match self.tracking.as_ref()?.divergence {
            Divergence::Counts { ahead, .. } => ahead,
            Divergence::Gone => None,
        }
    }

    pub fn behind(&self) -> Option<u32> {
        match self.tracking.as_ref()?.divergence {
            Divergence::Counts { behind, .. } => behind,
            Divergence::Gone => None,
        }
    }

    pub fn is_gone(&self) -> bool {
        matches!(
            self.tracking,
            Some(Tracking {
                divergence: Divergence::Gone,
                ..
            })
        )
    }

    /// A branch needs attention when it has diverged from its upstream in
    /// either direction.
    pub fn has_diverged(&self) -> bool {
        self.ahead().is_some() || self.behind().is_some()
    }

    /// Detached HEAD and in-progress rebases are listed under a parenthesised
    /// pseudo-name instead of a real branch.
    pub fn is_detached(&self) -> bool {
        self.name.starts_with('(')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tracking: Option<Tracking>) -> BranchRecord {
        BranchRecord {
            name: "main".to_string(),
            is_active: true,
            in_other_worktree: false,
            commit_hash: "abc1234".to_string(),
            worktree_path: None,
            tracking,
        }
    }

    #[test]
    fn untracked_branch_has_no_optional_fields() {
        let record = record(None);

        assert_eq!(record.upstream(), None);
        assert_eq!(record.ahead(), None);
        assert_eq!(record.behind(), None);
        assert!(!record.is_gone());
        assert!(!record.has_diverged());
    }

    #[test]
    fn gone_upstream_hides_counts() {
        let record = record(Some(Tracking::new(
            "origin/main".to_string(),
            Divergence::Gone,
        )));

        assert_eq!(record.upstream(), Some("origin/main"));
        assert!(record.is_gone());
        assert_eq!(record.ahead(), None);
        assert_eq!(record.behind(), None);
        assert!(!record.has_diverged());
    }

    #[test]
    fn single_count_marks_divergence() {
        let record = record(Some(Tracking::new(
            "origin/main".to_string(),
            Divergence::Counts {
                ahead: None,
                behind: Some(3),
            },
        )));

        assert_eq!(record.ahead(), None);
        assert_eq!(record.behind(), Some(3));
        assert!(record.has_diverged());
    }

    #[test]
    fn parenthesised_name_is_detached() {
        let mut record = record(None);
        record.name = "(HEAD detached at abc1234)".to_string();

        assert!(record.is_detached());
    }
}
