//! Error types for fwdport

use thiserror::Error;

/// Errors that can occur while integrating commits
#[derive(Error, Debug)]
pub enum Error {
    /// A branch named on the command line does not exist
    #[error("branch '{0}' does not exist")]
    BranchNotFound(String),

    /// The checked-out branch is not the integration target
    #[error("current branch is '{actual}', but commits must be integrated into '{expected}'")]
    WrongBranch {
        /// Branch the operator asked to integrate into
        expected: String,
        /// Branch that is actually checked out
        actual: String,
    },

    /// HEAD does not point at a branch
    #[error("HEAD is detached; check out '{0}' first")]
    DetachedHead(String),

    /// Every commit of `from` is already part of `into`
    #[error("nothing to integrate from '{from}' into '{into}'")]
    NothingToIntegrate {
        /// Source branch
        from: String,
        /// Target branch
        into: String,
    },

    /// A commit has no not-yet-integrated history relative to its base
    #[error("commit {commit} has no commits that are not already in {base}")]
    InconsistentHistory {
        /// Commit being composed
        commit: String,
        /// Base it was compared against
        base: String,
    },

    /// A merge-pattern commit lacks the parent holding its content
    #[error("commit {0} looks like a merge but has no second parent")]
    MissingSecondParent(String),

    /// A git command failed
    #[error("git {command} failed: {stderr}")]
    Git {
        /// Arguments passed to git
        command: String,
        /// Captured standard error
        stderr: String,
    },

    /// An earlier integration step has not been finalized
    #[error("an integration is already in progress: {0}")]
    IntegrationInProgress(String),

    /// `continue` was requested but nothing is suspended
    #[error("no integration in progress")]
    NoPendingIntegration,

    /// Reading or writing the pending-integration file failed
    #[error("pending state error: {0}")]
    Pending(String),

    /// Configuration file could not be read
    #[error("config error: {0}")]
    Config(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
