//! Integration planning - read-only

use super::decision::should_skip;
use crate::error::Result;
use crate::history::HistoryAccessor;
use crate::message::{ComposedMessage, compose};
use crate::pending::{PENDING_VERSION, PendingIntegration};
use crate::types::{CommitId, Decision, IntegrationRequest};
use tracing::info;

/// Everything needed to carry out one integration step
///
/// Built from a single read of the repository. `execute_integration()`
/// finalizes with exactly this message.
#[derive(Debug, Clone)]
pub struct IntegrationPlan {
    /// The request this plan answers
    pub request: IntegrationRequest,
    /// Head of the target branch when the plan was made
    pub base: CommitId,
    /// Abbreviation of the requested commit
    pub abbrev: String,
    /// Skip or merge
    pub decision: Decision,
    /// Prefixed message to finalize with
    pub message: ComposedMessage,
}

impl IntegrationPlan {
    /// Rendered commit message
    pub fn message_text(&self) -> String {
        self.message.render()
    }

    /// Resume token for this plan, waiting on `conflicts`
    pub fn to_pending(&self, conflicts: Vec<String>) -> PendingIntegration {
        PendingIntegration {
            version: PENDING_VERSION,
            commit: self.request.commit.clone(),
            abbrev: self.abbrev.clone(),
            from_branch: self.request.from_branch.clone(),
            into_branch: self.request.into_branch.clone(),
            base: self.base.clone(),
            decision: self.decision,
            message: self.message_text(),
            conflicts,
        }
    }
}

/// A not-yet-integrated commit with its auto decision, for listing
#[derive(Debug, Clone)]
pub struct QueuedCommit {
    /// Commit id
    pub commit: CommitId,
    /// Abbreviation
    pub abbrev: String,
    /// First line of its body
    pub subject: String,
    /// What `apply` would do if this were the next commit
    pub decision: Decision,
}

/// Prefix of an integration message, e.g. `Merged 'abc1234' from hotfix: `
pub fn message_prefix(decision: Decision, abbrev: &str, from_branch: &str) -> String {
    format!("{} '{abbrev}' from {from_branch}: ", decision.verb())
}

/// Commits of `from_branch` not yet in `into_branch`, oldest first
pub fn pending_commits<H>(history: &H, from_branch: &str, into_branch: &str) -> Result<Vec<CommitId>>
where
    H: HistoryAccessor + ?Sized,
{
    let from_head = history.head_of(from_branch)?;
    let into_head = history.head_of(into_branch)?;
    let mut commits = history.commits_not_in(&from_head, &into_head)?;
    commits.reverse();
    Ok(commits)
}

/// The oldest commit of `from_branch` not yet in `into_branch`
pub fn next_commit<H>(history: &H, from_branch: &str, into_branch: &str) -> Result<Option<CommitId>>
where
    H: HistoryAccessor + ?Sized,
{
    Ok(pending_commits(history, from_branch, into_branch)?
        .into_iter()
        .next())
}

/// Decide and compose one integration step (PURE apart from repository reads)
///
/// The target branch head is read once here and used for both the decision
/// and the message, so later movement of the branch cannot change either.
pub fn plan_integration<H>(history: &H, request: &IntegrationRequest) -> Result<IntegrationPlan>
where
    H: HistoryAccessor + ?Sized,
{
    let base = history.head_of(&request.into_branch)?;
    let skip = should_skip(
        history,
        &request.commit,
        &base,
        request.force_skip,
        request.force_merge,
    )?;
    let decision = if skip { Decision::Skip } else { Decision::Merge };

    let abbrev = history.abbrev(&request.commit)?;
    let prefix = message_prefix(decision, &abbrev, &request.from_branch);
    let message = compose(history, &prefix, &request.commit, &base)?;

    info!(
        commit = %request.commit,
        from = %request.from_branch,
        into = %request.into_branch,
        %decision,
        "planned integration"
    );

    Ok(IntegrationPlan {
        request: request.clone(),
        base,
        abbrev,
        decision,
        message,
    })
}

/// The message `integrate` would finalize with, without touching the repository
pub fn show<H>(history: &H, request: &IntegrationRequest) -> Result<String>
where
    H: HistoryAccessor + ?Sized,
{
    Ok(plan_integration(history, request)?.message_text())
}

/// Every not-yet-integrated commit with the decision `apply` would make for it
///
/// Each commit is judged as if everything before it had already been
/// integrated: the first against the target head, later ones against the
/// commit queued just before them. Subjects are the composed ones, so a
/// pull-request merge shows the subject of the commit it brought in.
pub fn queue<H>(history: &H, from_branch: &str, into_branch: &str) -> Result<Vec<QueuedCommit>>
where
    H: HistoryAccessor + ?Sized,
{
    let mut base = history.head_of(into_branch)?;
    let mut queued = Vec::new();
    for commit in pending_commits(history, from_branch, into_branch)? {
        let skip = should_skip(history, &commit, &base, false, false)?;
        // Merge commits are listed under the subject they would be committed with
        let composed = compose(history, "", &commit, &base)?;
        queued.push(QueuedCommit {
            abbrev: history.abbrev(&commit)?,
            subject: composed.subject,
            decision: if skip { Decision::Skip } else { Decision::Merge },
            commit: commit.clone(),
        });
        base = commit;
    }
    Ok(queued)
}
