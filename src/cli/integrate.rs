//! apply / skip / merge commands - integrate the next commit

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check};
use crate::cli::{CliProgress, CommandStatus};
use anstream::println;
use dialoguer::Confirm;
use fwdport::error::{Error, Result};
use fwdport::integrate::{
    CompletedIntegration, IntegrationOutcome, execute_integration, plan_integration,
    resume_integration,
};
use fwdport::pending::{PendingIntegration, clear_pending, save_pending};
use fwdport::types::IntegrationMode;
use std::path::Path;

/// Run apply, skip or merge depending on `mode`
pub fn run_integrate(
    path: &Path,
    from: &str,
    into: &str,
    mode: IntegrationMode,
    no_prompt: bool,
) -> Result<CommandStatus> {
    let ctx = CommandContext::new(path, no_prompt)?;
    ctx.require_branches(from, into)?;
    ctx.require_checked_out(into)?;
    ctx.require_idle()?;

    let request = ctx.next_request(from, into, mode)?;
    let plan = plan_integration(&ctx.repo, &request)?;

    let progress = CliProgress;
    let outcome = execute_integration(&plan, &ctx.repo, &progress)?;
    drive_to_completion(&ctx, outcome)
}

/// Report an outcome, waiting for conflict resolution when interactive
///
/// A suspended step is written to the pending file before returning so that
/// `fwdport continue` finalizes it with the same message.
pub fn drive_to_completion(
    ctx: &CommandContext,
    mut outcome: IntegrationOutcome,
) -> Result<CommandStatus> {
    let progress = CliProgress;
    loop {
        match outcome {
            IntegrationOutcome::Completed(done) => {
                clear_pending(ctx.repo.git_dir())?;
                print_completed(&done);
                return Ok(CommandStatus::Done);
            }
            IntegrationOutcome::Suspended(pending) => {
                print_conflicts(&pending);
                if !ctx.should_prompt() || !confirm_resolved()? {
                    save_pending(ctx.repo.git_dir(), &pending)?;
                    println!();
                    println!(
                        "{}",
                        "Resolve the conflicts, stage the result, then run 'fwdport continue'."
                            .muted()
                    );
                    return Ok(CommandStatus::Suspended);
                }
                outcome = resume_integration(&pending, &ctx.repo, &progress)?;
            }
        }
    }
}

fn confirm_resolved() -> Result<bool> {
    Confirm::new()
        .with_prompt("Conflicts resolved and staged? Finalize the commit now")
        .default(true)
        .interact()
        .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))
}

fn print_conflicts(pending: &PendingIntegration) {
    println!();
    println!(
        "{} Merge of {} stopped with conflicts:",
        "⚠".warn(),
        format!("'{}'", pending.abbrev).accent()
    );
    for path in &pending.conflicts {
        println!("    {}", path.warn());
    }
}

fn print_completed(done: &CompletedIntegration) {
    let subject = done.message.lines().next().unwrap_or_default();
    println!("{} {}", check(), subject.emphasis());
    if done.skip_violation {
        println!(
            "{} {}",
            "⚠".warn(),
            format!(
                "skip commit {} changes content relative to its first parent",
                done.commit
            )
            .warn()
        );
        println!(
            "{}",
            "   The history is valid, but an earlier integration probably went wrong.".muted()
        );
    }
}
