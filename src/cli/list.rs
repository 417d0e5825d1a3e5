//! List command - show every commit still waiting to be integrated

use crate::cli::CommandStatus;
use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, spinner_style};
use anstream::println;
use fwdport::error::Result;
use fwdport::integrate::queue;
use fwdport::types::Decision;
use indicatif::ProgressBar;
use std::path::Path;
use std::time::Duration;

/// List not-yet-integrated commits, oldest first, with their auto decision
pub fn run_list(path: &Path, from: &str, into: &str) -> Result<CommandStatus> {
    let ctx = CommandContext::new(path, true)?;
    ctx.require_branches(from, into)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!("Reading history of {}...", from.emphasis()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let queued = queue(&ctx.repo, from, into);
    spinner.finish_and_clear();
    let queued = queued?;

    if queued.is_empty() {
        println!(
            "{}",
            format!("Nothing to integrate from {from} into {into}.").muted()
        );
        return Ok(CommandStatus::Done);
    }

    println!(
        "{} commit(s) from {} not yet in {}:",
        queued.len(),
        from.accent(),
        into.accent()
    );
    println!();
    for entry in &queued {
        let decision = match entry.decision {
            Decision::Merge => "merge".success(),
            Decision::Skip => "skip ".warn(),
        };
        println!("  {} {} {}", decision, entry.abbrev.accent(), entry.subject);
    }

    Ok(CommandStatus::Done)
}
