//! Command implementations for the `fwdport` binary

pub mod context;
mod integrate;
mod list;
mod resume;
mod show;
pub mod style;

pub use integrate::run_integrate;
pub use list::run_list;
pub use resume::run_continue;
pub use show::run_show;

use anstream::println;
use fwdport::integrate::ProgressCallback;
use style::{Stylize, arrow};

/// How a command ended when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// Finished
    Done,
    /// Stopped on merge conflicts; `fwdport continue` finishes the step
    Suspended,
}

/// Prints orchestrator progress as muted arrow lines
pub struct CliProgress;

impl ProgressCallback for CliProgress {
    fn on_message(&self, message: &str) {
        println!("{} {}", arrow(), message.muted());
    }
}
