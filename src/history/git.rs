//! `git` executable adapter

use super::{HistoryAccessor, MergeBackend};
use crate::error::{Error, Result};
use crate::types::{CommitId, MergeStatus, MergeStrategy};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

/// A git repository driven through the `git` command line
#[derive(Debug, Clone)]
pub struct GitRepo {
    workdir: PathBuf,
    git_dir: PathBuf,
    abbrev_length: Option<usize>,
}

impl GitRepo {
    /// Open the repository containing `path`
    pub fn open(path: &Path) -> Result<Self> {
        let probe = Self {
            workdir: path.to_path_buf(),
            git_dir: PathBuf::new(),
            abbrev_length: None,
        };
        let toplevel = probe.read(&["rev-parse", "--show-toplevel"])?;
        let git_dir = probe.read(&["rev-parse", "--absolute-git-dir"])?;

        Ok(Self {
            workdir: PathBuf::from(toplevel.trim()),
            git_dir: PathBuf::from(git_dir.trim()),
            abbrev_length: None,
        })
    }

    /// Use a fixed abbreviation length instead of git's default
    #[must_use]
    pub const fn with_abbrev_length(mut self, length: Option<usize>) -> Self {
        self.abbrev_length = length;
        self
    }

    /// The `.git` directory (resolved for worktrees)
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        debug!(args = ?args, "running git");
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| Error::Git {
                command: args.join(" "),
                stderr: format!("failed to spawn git: {e}"),
            })
    }

    /// Run git and return stdout, failing on a non-zero exit
    fn read(&self, args: &[&str]) -> Result<String> {
        let output = self.run(args)?;
        if !output.status.success() {
            return Err(git_error(args, &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Full commit id of a revision that must exist
    fn resolve(&self, rev: &str) -> Result<CommitId> {
        let target = format!("{rev}^{{commit}}");
        let stdout = self.read(&["rev-parse", "--verify", &target])?;
        Ok(CommitId::new(stdout.trim()))
    }

    /// Run git where a non-zero exit means "no" rather than failure
    fn probe(&self, args: &[&str]) -> Result<bool> {
        Ok(self.run(args)?.status.success())
    }
}

fn git_error(args: &[&str], output: &Output) -> Error {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let detail = if stderr.trim().is_empty() {
        stdout.trim().to_string()
    } else {
        stderr.trim().to_string()
    };
    Error::Git {
        command: args.join(" "),
        stderr: detail,
    }
}

fn parse_ids(stdout: &str) -> Vec<CommitId> {
    stdout
        .split_whitespace()
        .map(CommitId::from)
        .collect()
}

impl HistoryAccessor for GitRepo {
    fn commits_not_in(&self, commit: &CommitId, base: &CommitId) -> Result<Vec<CommitId>> {
        let exclude = format!("^{base}");
        let stdout = self.read(&["rev-list", "--first-parent", commit.as_str(), &exclude])?;
        Ok(parse_ids(&stdout))
    }

    fn body(&self, commit: &CommitId) -> Result<String> {
        let stdout = self.read(&["show", "-s", "--format=%B", commit.as_str()])?;
        Ok(stdout.trim_end().to_string())
    }

    fn abbrev(&self, commit: &CommitId) -> Result<String> {
        let short = self
            .abbrev_length
            .map_or_else(|| "--short".to_string(), |n| format!("--short={n}"));
        let stdout = self.read(&["rev-parse", &short, commit.as_str()])?;
        Ok(stdout.trim().to_string())
    }

    fn parents(&self, commit: &CommitId) -> Result<Vec<CommitId>> {
        let stdout = self.read(&["show", "-s", "--format=%P", commit.as_str()])?;
        Ok(parse_ids(&stdout))
    }

    fn head_of(&self, branch: &str) -> Result<CommitId> {
        if !self.branch_exists(branch)? {
            return Err(Error::BranchNotFound(branch.to_string()));
        }
        self.resolve(&format!("refs/heads/{branch}"))
    }

    fn branch_exists(&self, name: &str) -> Result<bool> {
        // Only local branches count; tags and raw revisions do not
        let full_ref = format!("refs/heads/{name}");
        let args = ["show-ref", "--verify", "--quiet", full_ref.as_str()];
        let output = self.run(&args)?;
        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(git_error(&args, &output)),
        }
    }

    fn current_branch(&self) -> Result<Option<String>> {
        let output = self.run(&["symbolic-ref", "--quiet", "--short", "HEAD"])?;
        if output.status.success() {
            Ok(Some(String::from_utf8_lossy(&output.stdout).trim().to_string()))
        } else {
            Ok(None)
        }
    }
}

impl MergeBackend for GitRepo {
    fn merge_no_commit(&self, commit: &CommitId, strategy: MergeStrategy) -> Result<MergeStatus> {
        let mut args = vec!["merge", "--no-ff", "--no-commit"];
        if strategy == MergeStrategy::Ours {
            args.extend(["-s", "ours"]);
        }
        args.push(commit.as_str());

        let output = self.run(&args)?;
        if output.status.success() {
            return Ok(MergeStatus::Clean);
        }

        let conflicts = self.unresolved_paths()?;
        if conflicts.is_empty() {
            return Err(git_error(&args, &output));
        }
        debug!(count = conflicts.len(), "merge stopped with conflicts");
        Ok(MergeStatus::Conflicted(conflicts))
    }

    fn merge_in_progress(&self) -> Result<bool> {
        self.probe(&["rev-parse", "--verify", "--quiet", "MERGE_HEAD"])
    }

    fn unresolved_paths(&self) -> Result<Vec<String>> {
        let stdout = self.read(&["diff", "--name-only", "--diff-filter=U"])?;
        Ok(stdout.lines().map(ToString::to_string).collect())
    }

    fn commit(&self, message: &str) -> Result<CommitId> {
        // Verbatim keeps the composed text byte-for-byte, blank runs included
        self.read(&["commit", "--quiet", "--cleanup=verbatim", "-m", message])?;
        self.resolve("HEAD")
    }

    fn differs_from_first_parent(&self, commit: &CommitId) -> Result<bool> {
        let parent = format!("{commit}^1");
        let args = ["diff", "--quiet", parent.as_str(), commit.as_str()];
        let output = self.run(&args)?;
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(git_error(&args, &output)),
        }
    }
}
