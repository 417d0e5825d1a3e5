//! Show command - print the next integration message without committing

use crate::cli::CommandStatus;
use crate::cli::context::CommandContext;
use anstream::println;
use fwdport::error::Result;
use fwdport::integrate::show;
use fwdport::types::IntegrationMode;
use std::path::Path;

/// Print the message `apply` would commit for the next commit
pub fn run_show(path: &Path, from: &str, into: &str) -> Result<CommandStatus> {
    let ctx = CommandContext::new(path, true)?;
    ctx.require_branches(from, into)?;
    ctx.require_checked_out(into)?;

    let request = ctx.next_request(from, into, IntegrationMode::Auto)?;
    println!("{}", show(&ctx.repo, &request)?);

    Ok(CommandStatus::Done)
}
