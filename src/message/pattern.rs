//! Classification of commit bodies

/// Body prefix of a pull-request merge commit
pub const PULL_REQUEST_MERGE_PREFIX: &str = "Merge pull request #";

/// Body prefix of a `git merge <commit>` commit
pub const COMMIT_MERGE_PREFIX: &str = "Merge commit '";

/// Body prefix of a `git merge <branch>` commit
pub const BRANCH_MERGE_PREFIX: &str = "Merge branch '";

/// Body line that marks a change as specific to its source branch
pub const BRANCH_SPECIFIC_TAG: &str = "@branch-specific";

/// What kind of commit a body describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeKind {
    /// "Merge pull request #..."
    PullRequestMerge,
    /// "Merge commit '...'"
    CommitMerge,
    /// "Merge branch '...'"
    BranchMerge,
    /// Anything else: an authored change
    Plain,
}

impl MergeKind {
    /// Whether the commit's authored content lives on its second parent
    pub const fn is_merge(self) -> bool {
        !matches!(self, Self::Plain)
    }
}

/// Classify a commit body by its leading text
pub fn classify(body: &str) -> MergeKind {
    if body.starts_with(PULL_REQUEST_MERGE_PREFIX) {
        MergeKind::PullRequestMerge
    } else if body.starts_with(COMMIT_MERGE_PREFIX) {
        MergeKind::CommitMerge
    } else if body.starts_with(BRANCH_MERGE_PREFIX) {
        MergeKind::BranchMerge
    } else {
        MergeKind::Plain
    }
}
