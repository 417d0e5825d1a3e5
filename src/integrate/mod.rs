//! Integration engine
//!
//! Two-phase pattern:
//! 1. Plan - read the repository once, decide skip/merge, compose the message
//! 2. Execute - merge, then finalize or suspend on conflicts

mod decision;
mod execute;
mod plan;

pub use decision::should_skip;
pub use execute::{
    CompletedIntegration, IntegrationOutcome, execute_integration, resume_integration,
};
pub use plan::{
    IntegrationPlan, QueuedCommit, message_prefix, next_commit, pending_commits,
    plan_integration, queue, show,
};

use crate::error::Result;
use crate::history::MergeBackend;
use crate::types::IntegrationRequest;

/// Progress reporting for integration steps
pub trait ProgressCallback {
    /// Called with a human-readable status line
    fn on_message(&self, message: &str);
}

/// Discards progress messages
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_message(&self, _message: &str) {}
}

/// Plan and execute one integration step
pub fn integrate(
    backend: &dyn MergeBackend,
    request: &IntegrationRequest,
    progress: &dyn ProgressCallback,
) -> Result<IntegrationOutcome> {
    let plan = plan_integration(backend, request)?;
    execute_integration(&plan, backend, progress)
}
