//! Real git repositories in temporary directories

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// A git repository with `develop` checked out and `hotfix` branched from it
///
/// Both branches start at an initial commit containing `README.md`.
pub struct TempGitRepo {
    dir: TempDir,
}

impl TempGitRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let repo = Self { dir };

        repo.git(&["init", "--quiet", "--initial-branch=develop"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo.commit_file("README.md", "base\n", "Initial commit");
        repo.git(&["branch", "hotfix"]);

        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run git, returning the raw output
    pub fn try_git(&self, args: &[&str]) -> Output {
        Command::new("git")
            .args(args)
            .current_dir(self.path())
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .output()
            .expect("spawn git")
    }

    /// Run git, panicking on failure, returning trimmed stdout
    pub fn git(&self, args: &[&str]) -> String {
        let output = self.try_git(args);
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    pub fn write(&self, file: &str, content: &str) {
        fs::write(self.path().join(file), content).expect("write file");
    }

    pub fn exists(&self, file: &str) -> bool {
        self.path().join(file).exists()
    }

    /// Write a file, commit it on the current branch, return the full id
    pub fn commit_file(&self, file: &str, content: &str, message: &str) -> String {
        self.write(file, content);
        self.git(&["add", file]);
        self.git(&["commit", "--quiet", "-m", message]);
        self.git(&["rev-parse", "HEAD"])
    }

    /// Commit `file` on `branch`, then return to `develop`
    pub fn commit_on(&self, branch: &str, file: &str, content: &str, message: &str) -> String {
        self.checkout(branch);
        let id = self.commit_file(file, content, message);
        self.checkout("develop");
        id
    }

    /// Like `commit_on`, but the message is stored exactly as given
    pub fn commit_verbatim_on(&self, branch: &str, file: &str, content: &str, message: &str) -> String {
        self.checkout(branch);
        self.write(file, content);
        self.git(&["add", file]);
        self.git(&["commit", "--quiet", "--cleanup=verbatim", "-m", message]);
        let id = self.head();
        self.checkout("develop");
        id
    }

    pub fn checkout(&self, branch: &str) {
        self.git(&["checkout", "--quiet", branch]);
    }

    pub fn short(&self, rev: &str) -> String {
        self.git(&["rev-parse", "--short", rev])
    }

    pub fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"])
    }

    pub fn head_message(&self) -> String {
        self.git(&["log", "-1", "--format=%B"])
    }

    /// HEAD's message as stored in the commit object, untrimmed
    pub fn head_raw_message(&self) -> String {
        let output = self.try_git(&["cat-file", "commit", "HEAD"]);
        assert!(output.status.success(), "git cat-file failed");
        let raw = String::from_utf8(output.stdout).expect("utf-8 commit object");
        raw.split_once("\n\n")
            .map(|(_, message)| message.to_string())
            .unwrap_or_default()
    }

    pub fn head_parents(&self) -> Vec<String> {
        self.git(&["show", "-s", "--format=%P", "HEAD"])
            .split_whitespace()
            .map(ToString::to_string)
            .collect()
    }

    /// Whether HEAD has no content changes relative to its first parent
    pub fn head_matches_first_parent(&self) -> bool {
        self.try_git(&["diff", "--quiet", "HEAD^1", "HEAD"])
            .status
            .success()
    }
}
