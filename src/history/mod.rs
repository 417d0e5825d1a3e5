//! Access to the commit graph
//!
//! The integration engine never owns commit objects. It reads the graph and
//! requests merges through these traits, so the same logic runs against a
//! real git repository or an in-memory fake in tests.

mod git;

pub use git::GitRepo;

use crate::error::Result;
use crate::types::{CommitId, MergeStatus, MergeStrategy};

/// Read-only view of the commit graph
///
/// Results must stay consistent for a fixed repository state; callers resolve
/// the base commit once per integration step and pass it explicitly.
pub trait HistoryAccessor {
    /// Commits reachable from `commit` but not from `base`, following first
    /// parents only, newest first
    fn commits_not_in(&self, commit: &CommitId, base: &CommitId) -> Result<Vec<CommitId>>;

    /// Full message body of a commit
    fn body(&self, commit: &CommitId) -> Result<String>;

    /// Short display form of a commit id
    fn abbrev(&self, commit: &CommitId) -> Result<String>;

    /// Parents in order (first parent first)
    fn parents(&self, commit: &CommitId) -> Result<Vec<CommitId>>;

    /// Commit a branch currently points to
    fn head_of(&self, branch: &str) -> Result<CommitId>;

    /// Whether a branch with this name exists
    fn branch_exists(&self, name: &str) -> Result<bool>;

    /// Checked-out branch, `None` when HEAD is detached
    fn current_branch(&self) -> Result<Option<String>>;
}

/// Mutating operations on the checked-out branch
pub trait MergeBackend: HistoryAccessor {
    /// Merge `commit` into HEAD without committing
    ///
    /// Always produces a merge (never fast-forwards). Conflicts are reported
    /// through [`MergeStatus::Conflicted`], not as an error.
    fn merge_no_commit(&self, commit: &CommitId, strategy: MergeStrategy) -> Result<MergeStatus>;

    /// Whether a merge has been started and not yet committed
    fn merge_in_progress(&self) -> Result<bool>;

    /// Paths that still have unresolved conflicts
    fn unresolved_paths(&self) -> Result<Vec<String>>;

    /// Commit the staged state with `message`, returning the new commit
    fn commit(&self, message: &str) -> Result<CommitId>;

    /// Whether `commit` changes any tracked content relative to its first parent
    fn differs_from_first_parent(&self, commit: &CommitId) -> Result<bool>;
}
