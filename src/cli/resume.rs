//! Continue command - finalize an integration that stopped on conflicts

use crate::cli::context::CommandContext;
use crate::cli::integrate::drive_to_completion;
use crate::cli::{CliProgress, CommandStatus};
use fwdport::error::{Error, Result};
use fwdport::integrate::resume_integration;
use fwdport::pending::{clear_pending, load_pending};
use std::path::Path;

/// Resume the saved integration step
pub fn run_continue(path: &Path, no_prompt: bool) -> Result<CommandStatus> {
    let ctx = CommandContext::new(path, no_prompt)?;
    let pending = load_pending(ctx.repo.git_dir())?.ok_or(Error::NoPendingIntegration)?;
    ctx.require_checked_out(&pending.into_branch)?;

    let outcome = match resume_integration(&pending, &ctx.repo, &CliProgress) {
        Err(Error::NoPendingIntegration) => {
            // The operator aborted the merge; the saved step is stale
            clear_pending(ctx.repo.git_dir())?;
            return Err(Error::NoPendingIntegration);
        }
        other => other?,
    };

    drive_to_completion(&ctx, outcome)
}
