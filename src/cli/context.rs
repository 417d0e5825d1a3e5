//! Shared command context for CLI commands
//!
//! Opens the repository, loads configuration and enforces the preconditions
//! every integration command checks before touching history.

use fwdport::config::{Config, ConflictMode, load_config};
use fwdport::error::{Error, Result};
use fwdport::history::{GitRepo, HistoryAccessor};
use fwdport::integrate::next_commit;
use fwdport::pending::load_pending;
use fwdport::types::{IntegrationMode, IntegrationRequest};
use std::io::IsTerminal;
use std::path::Path;

/// Shared context for commands that read or integrate history
pub struct CommandContext {
    /// The git repository
    pub repo: GitRepo,
    /// Effective configuration (config files plus CLI overrides)
    pub config: Config,
}

impl CommandContext {
    /// Open the repository at `path` and load its configuration
    ///
    /// `no_prompt` forces suspend-on-conflict regardless of config.
    pub fn new(path: &Path, no_prompt: bool) -> Result<Self> {
        let repo = GitRepo::open(path)?;
        let mut config = load_config(repo.git_dir())?;
        if no_prompt {
            config.conflict_mode = ConflictMode::Suspend;
        }
        let repo = repo.with_abbrev_length(config.abbrev_length);

        Ok(Self { repo, config })
    }

    /// Both branches must exist
    pub fn require_branches(&self, from: &str, into: &str) -> Result<()> {
        for branch in [from, into] {
            if !self.repo.branch_exists(branch)? {
                return Err(Error::BranchNotFound(branch.to_string()));
            }
        }
        Ok(())
    }

    /// `into` must be the checked-out branch
    pub fn require_checked_out(&self, into: &str) -> Result<()> {
        match self.repo.current_branch()? {
            Some(current) if current == into => Ok(()),
            Some(current) => Err(Error::WrongBranch {
                expected: into.to_string(),
                actual: current,
            }),
            None => Err(Error::DetachedHead(into.to_string())),
        }
    }

    /// No earlier step may still be waiting on conflicts
    pub fn require_idle(&self) -> Result<()> {
        if let Some(pending) = load_pending(self.repo.git_dir())? {
            return Err(Error::IntegrationInProgress(format!(
                "{}; resolve conflicts and run 'fwdport continue'",
                pending.describe()
            )));
        }
        Ok(())
    }

    /// Request for the oldest commit of `from` not yet in `into`
    pub fn next_request(
        &self,
        from: &str,
        into: &str,
        mode: IntegrationMode,
    ) -> Result<IntegrationRequest> {
        let commit = next_commit(&self.repo, from, into)?.ok_or_else(|| {
            Error::NothingToIntegrate {
                from: from.to_string(),
                into: into.to_string(),
            }
        })?;
        Ok(IntegrationRequest::new(commit, from, into, mode))
    }

    /// Whether to wait for conflict resolution in this session
    pub fn should_prompt(&self) -> bool {
        self.config.conflict_mode == ConflictMode::Prompt && std::io::stdin().is_terminal()
    }
}
