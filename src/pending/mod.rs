//! Suspended integrations
//!
//! When a merge stops on conflicts, the step is recorded here so it can be
//! finalized later with exactly the message that was composed before the
//! pause, even from a different process.

mod storage;

pub use storage::{clear_pending, load_pending, pending_path, save_pending, state_dir};

use crate::types::{CommitId, Decision};
use serde::{Deserialize, Serialize};

/// Current pending-state format version
pub const PENDING_VERSION: u32 = 1;

/// An integration step waiting for conflict resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingIntegration {
    /// Format version
    #[serde(default = "default_version")]
    pub version: u32,
    /// Commit being integrated
    pub commit: CommitId,
    /// Abbreviation used in the message prefix
    pub abbrev: String,
    /// Source branch
    pub from_branch: String,
    /// Target branch
    pub into_branch: String,
    /// Head of the target branch before the merge started
    pub base: CommitId,
    /// Skip or merge
    pub decision: Decision,
    /// Message to finalize with
    pub message: String,
    /// Paths that were conflicted when last checked
    #[serde(default)]
    pub conflicts: Vec<String>,
}

const fn default_version() -> u32 {
    PENDING_VERSION
}

impl PendingIntegration {
    /// Short human description, e.g. `merge 'abc1234' from hotfix into develop`
    pub fn describe(&self) -> String {
        format!(
            "{} '{}' from {} into {}",
            self.decision, self.abbrev, self.from_branch, self.into_branch
        )
    }
}
