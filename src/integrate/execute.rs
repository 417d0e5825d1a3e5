//! Integration execution - effectful operations
//!
//! Takes an `IntegrationPlan` (created by the read-only planning functions)
//! and carries it out through a `MergeBackend`.

use super::ProgressCallback;
use super::plan::IntegrationPlan;
use crate::error::{Error, Result};
use crate::history::MergeBackend;
use crate::pending::PendingIntegration;
use crate::types::{CommitId, Decision, MergeStatus, MergeStrategy};
use tracing::{info, warn};

/// A finalized integration commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedIntegration {
    /// The new commit on the target branch
    pub commit: CommitId,
    /// Skip or merge
    pub decision: Decision,
    /// Message it was committed with
    pub message: String,
    /// A skip commit unexpectedly changed content relative to its first parent
    pub skip_violation: bool,
}

/// Result of running (or resuming) one integration step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrationOutcome {
    /// The step finished and produced a commit
    Completed(CompletedIntegration),
    /// The merge stopped on conflicts; resolve them, then resume with this token
    Suspended(PendingIntegration),
}

/// Execute an integration plan (EFFECTFUL)
///
/// Starts a no-commit merge with the strategy matching the decision. A clean
/// merge is finalized immediately with the planned message; a conflicted one
/// is returned as [`IntegrationOutcome::Suspended`] and never auto-resolved.
pub fn execute_integration(
    plan: &IntegrationPlan,
    backend: &dyn MergeBackend,
    progress: &dyn ProgressCallback,
) -> Result<IntegrationOutcome> {
    if backend.merge_in_progress()? {
        return Err(Error::IntegrationInProgress(
            "a merge is already in progress; finish or abort it first".to_string(),
        ));
    }

    let strategy = MergeStrategy::from(plan.decision);
    let verb = match plan.decision {
        Decision::Skip => "Skipping",
        Decision::Merge => "Merging",
    };
    progress.on_message(&format!(
        "{verb} '{}' from {} into {}",
        plan.abbrev, plan.request.from_branch, plan.request.into_branch
    ));

    match backend.merge_no_commit(&plan.request.commit, strategy)? {
        MergeStatus::Clean => {
            let completed = finalize(&plan.to_pending(Vec::new()), backend, progress)?;
            Ok(IntegrationOutcome::Completed(completed))
        }
        MergeStatus::Conflicted(paths) => {
            info!(
                commit = %plan.request.commit,
                conflicts = paths.len(),
                "integration suspended on conflicts"
            );
            Ok(IntegrationOutcome::Suspended(plan.to_pending(paths)))
        }
    }
}

/// Resume a suspended integration (EFFECTFUL)
///
/// Stays suspended while conflicted paths remain. Otherwise commits the staged
/// resolution with the message stored in `pending`.
pub fn resume_integration(
    pending: &PendingIntegration,
    backend: &dyn MergeBackend,
    progress: &dyn ProgressCallback,
) -> Result<IntegrationOutcome> {
    if !backend.merge_in_progress()? {
        return Err(Error::NoPendingIntegration);
    }

    let unresolved = backend.unresolved_paths()?;
    if !unresolved.is_empty() {
        return Ok(IntegrationOutcome::Suspended(PendingIntegration {
            conflicts: unresolved,
            ..pending.clone()
        }));
    }

    finalize(pending, backend, progress).map(IntegrationOutcome::Completed)
}

fn finalize(
    pending: &PendingIntegration,
    backend: &dyn MergeBackend,
    progress: &dyn ProgressCallback,
) -> Result<CompletedIntegration> {
    progress.on_message("Finalizing integration commit");
    let commit = backend.commit(&pending.message)?;

    let skip_violation =
        pending.decision == Decision::Skip && backend.differs_from_first_parent(&commit)?;
    if skip_violation {
        warn!(
            commit = %commit,
            skipped = %pending.commit,
            from = %pending.from_branch,
            into = %pending.into_branch,
            "skip commit introduces changes relative to its first parent"
        );
    }

    info!(commit = %commit, decision = %pending.decision, "integration committed");

    Ok(CompletedIntegration {
        commit,
        decision: pending.decision,
        message: pending.message.clone(),
        skip_violation,
    })
}
