//! Core types for fwdport

use serde::{Deserialize, Serialize};
use std::fmt;

/// Full identifier of a commit (hex object id)
///
/// Always the stable, full-length form. Abbreviations are requested from the
/// repository at the point of use since their length depends on the object
/// database at that moment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    /// Wrap a full commit id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommitId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// How the next commit's skip/merge decision is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegrationMode {
    /// Skip when the change log carries the branch-specific tag
    #[default]
    Auto,
    /// Always skip
    ForceSkip,
    /// Always merge
    ForceMerge,
}

impl IntegrationMode {
    /// Force flags `(force_skip, force_merge)`; never both set
    pub const fn force_flags(self) -> (bool, bool) {
        match self {
            Self::Auto => (false, false),
            Self::ForceSkip => (true, false),
            Self::ForceMerge => (false, true),
        }
    }
}

/// A request to integrate one commit of `from_branch` into `into_branch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationRequest {
    /// Commit to integrate
    pub commit: CommitId,
    /// Branch the commit comes from (used in the message prefix)
    pub from_branch: String,
    /// Branch receiving the commit
    pub into_branch: String,
    /// Record the commit as merged but discard its changes
    pub force_skip: bool,
    /// Apply the commit even if it is tagged branch-specific
    pub force_merge: bool,
}

impl IntegrationRequest {
    /// Build a request with force flags derived from `mode`
    pub fn new(
        commit: CommitId,
        from_branch: impl Into<String>,
        into_branch: impl Into<String>,
        mode: IntegrationMode,
    ) -> Self {
        let (force_skip, force_merge) = mode.force_flags();
        Self {
            commit,
            from_branch: from_branch.into(),
            into_branch: into_branch.into(),
            force_skip,
            force_merge,
        }
    }
}

/// Whether a commit's changes land in the target branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Record ancestry only, keep the target's content
    Skip,
    /// Apply the commit's changes
    Merge,
}

impl Decision {
    /// Verb used at the start of the composed subject line
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Skip => "Skipped",
            Self::Merge => "Merged",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Merge => write!(f, "merge"),
        }
    }
}

/// Merge strategy requested from the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Regular three-way merge
    Recursive,
    /// Keep our tree unchanged ("ours" strategy)
    Ours,
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recursive => write!(f, "recursive"),
            Self::Ours => write!(f, "ours"),
        }
    }
}

impl From<Decision> for MergeStrategy {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Skip => Self::Ours,
            Decision::Merge => Self::Recursive,
        }
    }
}

/// Outcome of a no-commit merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeStatus {
    /// Merge staged without conflicts, ready to commit
    Clean,
    /// Merge stopped with conflicts in these paths
    Conflicted(Vec<String>),
}
