//! In-memory repository for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use fwdport::error::{Error, Result};
use fwdport::history::{HistoryAccessor, MergeBackend};
use fwdport::integrate::ProgressCallback;
use fwdport::types::{CommitId, MergeStatus, MergeStrategy};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Call record for `merge_no_commit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCall {
    pub commit: CommitId,
    pub strategy: MergeStrategy,
}

#[derive(Debug, Clone)]
struct FakeCommit {
    parents: Vec<CommitId>,
    body: String,
    changes_content: bool,
}

#[derive(Debug, Clone)]
struct MergeState {
    commit: CommitId,
    strategy: MergeStrategy,
}

/// Commit graph held in memory
///
/// Commit ids are the names given by the test, and a commit's abbreviation is
/// its first seven characters, so short names double as their own abbrev.
///
/// Features:
/// - First-parent "not in" walks with full-ancestry exclusion, like git
/// - Merge state with conflict injection per commit
/// - Skip-violation injection
/// - Call tracking for verification
pub struct FakeRepo {
    commits: Mutex<HashMap<CommitId, FakeCommit>>,
    branches: Mutex<HashMap<String, CommitId>>,
    current: Mutex<Option<String>>,
    next_commit: AtomicU64,
    merge_state: Mutex<Option<MergeState>>,
    unresolved: Mutex<Vec<String>>,
    // Injection
    conflicts_on: Mutex<HashMap<CommitId, Vec<String>>>,
    skip_changes_content: AtomicBool,
    // Call tracking
    merge_calls: Mutex<Vec<MergeCall>>,
    commit_calls: Mutex<Vec<String>>,
}

impl FakeRepo {
    /// Empty repository with no branches
    pub fn new() -> Self {
        Self {
            commits: Mutex::new(HashMap::new()),
            branches: Mutex::new(HashMap::new()),
            current: Mutex::new(None),
            next_commit: AtomicU64::new(1),
            merge_state: Mutex::new(None),
            unresolved: Mutex::new(Vec::new()),
            conflicts_on: Mutex::new(HashMap::new()),
            skip_changes_content: AtomicBool::new(false),
            merge_calls: Mutex::new(Vec::new()),
            commit_calls: Mutex::new(Vec::new()),
        }
    }

    /// `develop` and `hotfix` both at a root commit, `develop` checked out
    pub fn with_hotfix_and_develop() -> Self {
        let repo = Self::new();
        repo.add_commit("root", &[], "Initial commit");
        repo.set_branch("develop", "root");
        repo.set_branch("hotfix", "root");
        repo.checkout("develop");
        repo
    }

    /// Add a commit with the given parents
    pub fn add_commit(&self, id: &str, parents: &[&str], body: &str) -> CommitId {
        let id = CommitId::new(id);
        self.commits.lock().unwrap().insert(
            id.clone(),
            FakeCommit {
                parents: parents.iter().map(|p| CommitId::new(*p)).collect(),
                body: body.to_string(),
                changes_content: true,
            },
        );
        id
    }

    /// Add a commit on top of `branch` and advance the branch
    pub fn commit_on(&self, branch: &str, id: &str, body: &str) -> CommitId {
        let head = self.branch_head(branch);
        let id = self.add_commit(id, &[head.as_str()], body);
        self.set_branch(branch, id.as_str());
        id
    }

    /// Add a two-parent merge commit on top of `branch`
    pub fn merge_on(&self, branch: &str, id: &str, second_parent: &str, body: &str) -> CommitId {
        let head = self.branch_head(branch);
        let id = self.add_commit(id, &[head.as_str(), second_parent], body);
        self.set_branch(branch, id.as_str());
        id
    }

    pub fn set_branch(&self, name: &str, id: &str) {
        self.branches
            .lock()
            .unwrap()
            .insert(name.to_string(), CommitId::new(id));
    }

    pub fn checkout(&self, name: &str) {
        *self.current.lock().unwrap() = Some(name.to_string());
    }

    pub fn detach(&self) {
        *self.current.lock().unwrap() = None;
    }

    pub fn branch_head(&self, name: &str) -> CommitId {
        self.branches
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("no branch {name}"))
    }

    pub fn parents_of(&self, id: &CommitId) -> Vec<CommitId> {
        self.commits.lock().unwrap()[id].parents.clone()
    }

    pub fn body_of(&self, id: &CommitId) -> String {
        self.commits.lock().unwrap()[id].body.clone()
    }

    /// Make merging `commit` (normal strategy) stop on these paths
    pub fn conflict_on(&self, commit: &str, paths: &[&str]) {
        self.conflicts_on.lock().unwrap().insert(
            CommitId::new(commit),
            paths.iter().map(ToString::to_string).collect(),
        );
    }

    /// Mark a conflicted path as resolved and staged
    pub fn resolve(&self, path: &str) {
        self.unresolved.lock().unwrap().retain(|p| p != path);
    }

    /// Abort the in-progress merge
    pub fn abort_merge(&self) {
        *self.merge_state.lock().unwrap() = None;
        self.unresolved.lock().unwrap().clear();
    }

    /// Make skip merges produce commits that change content
    pub fn leak_changes_on_skip(&self) {
        self.skip_changes_content.store(true, Ordering::SeqCst);
    }

    // =========================================================================
    // Call tracking
    // =========================================================================

    pub fn get_merge_calls(&self) -> Vec<MergeCall> {
        self.merge_calls.lock().unwrap().clone()
    }

    pub fn get_commit_calls(&self) -> Vec<String> {
        self.commit_calls.lock().unwrap().clone()
    }

    pub fn assert_no_mutation(&self) {
        assert!(
            self.get_merge_calls().is_empty(),
            "expected no merges, got {:?}",
            self.get_merge_calls()
        );
        assert!(
            self.get_commit_calls().is_empty(),
            "expected no commits, got {:?}",
            self.get_commit_calls()
        );
    }

    fn lookup(&self, id: &CommitId) -> Result<FakeCommit> {
        self.commits
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::Git {
                command: format!("show {id}"),
                stderr: "unknown revision".to_string(),
            })
    }

    fn ancestors(&self, start: &CommitId) -> HashSet<CommitId> {
        let commits = self.commits.lock().unwrap();
        let mut seen = HashSet::new();
        let mut stack = vec![start.clone()];
        while let Some(id) = stack.pop() {
            if !seen.insert(id.clone()) {
                continue;
            }
            if let Some(commit) = commits.get(&id) {
                stack.extend(commit.parents.iter().cloned());
            }
        }
        seen
    }
}

impl Default for FakeRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryAccessor for FakeRepo {
    fn commits_not_in(&self, commit: &CommitId, base: &CommitId) -> Result<Vec<CommitId>> {
        let excluded = self.ancestors(base);
        let mut result = Vec::new();
        let mut current = Some(commit.clone());
        while let Some(id) = current {
            if excluded.contains(&id) {
                break;
            }
            let parents = self.lookup(&id)?.parents;
            result.push(id);
            current = parents.into_iter().next();
        }
        Ok(result)
    }

    fn body(&self, commit: &CommitId) -> Result<String> {
        Ok(self.lookup(commit)?.body)
    }

    fn abbrev(&self, commit: &CommitId) -> Result<String> {
        self.lookup(commit)?;
        Ok(commit.as_str().chars().take(7).collect())
    }

    fn parents(&self, commit: &CommitId) -> Result<Vec<CommitId>> {
        Ok(self.lookup(commit)?.parents)
    }

    fn head_of(&self, branch: &str) -> Result<CommitId> {
        self.branches
            .lock()
            .unwrap()
            .get(branch)
            .cloned()
            .ok_or_else(|| Error::BranchNotFound(branch.to_string()))
    }

    fn branch_exists(&self, name: &str) -> Result<bool> {
        Ok(self.branches.lock().unwrap().contains_key(name))
    }

    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.current.lock().unwrap().clone())
    }
}

impl MergeBackend for FakeRepo {
    fn merge_no_commit(&self, commit: &CommitId, strategy: MergeStrategy) -> Result<MergeStatus> {
        self.merge_calls.lock().unwrap().push(MergeCall {
            commit: commit.clone(),
            strategy,
        });
        self.lookup(commit)?;

        let mut state = self.merge_state.lock().unwrap();
        if state.is_some() {
            return Err(Error::Git {
                command: format!("merge {commit}"),
                stderr: "You have not concluded your merge (MERGE_HEAD exists).".to_string(),
            });
        }
        *state = Some(MergeState {
            commit: commit.clone(),
            strategy,
        });

        let conflicts = if strategy == MergeStrategy::Recursive {
            self.conflicts_on
                .lock()
                .unwrap()
                .get(commit)
                .cloned()
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        if conflicts.is_empty() {
            Ok(MergeStatus::Clean)
        } else {
            self.unresolved.lock().unwrap().clone_from(&conflicts);
            Ok(MergeStatus::Conflicted(conflicts))
        }
    }

    fn merge_in_progress(&self) -> Result<bool> {
        Ok(self.merge_state.lock().unwrap().is_some())
    }

    fn unresolved_paths(&self) -> Result<Vec<String>> {
        Ok(self.unresolved.lock().unwrap().clone())
    }

    fn commit(&self, message: &str) -> Result<CommitId> {
        self.commit_calls.lock().unwrap().push(message.to_string());

        let branch = self
            .current
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::Internal("HEAD is detached".to_string()))?;
        let head = self.head_of(&branch)?;

        let state = self.merge_state.lock().unwrap().take();
        let (parents, changes_content) = match state {
            Some(merge) => {
                let changes = match merge.strategy {
                    MergeStrategy::Recursive => true,
                    MergeStrategy::Ours => self.skip_changes_content.load(Ordering::SeqCst),
                };
                (vec![head, merge.commit], changes)
            }
            None => (vec![head], true),
        };

        let id = CommitId::new(format!(
            "integration{}",
            self.next_commit.fetch_add(1, Ordering::SeqCst)
        ));
        self.commits.lock().unwrap().insert(
            id.clone(),
            FakeCommit {
                parents,
                body: message.to_string(),
                changes_content,
            },
        );
        self.set_branch(&branch, id.as_str());
        Ok(id)
    }

    fn differs_from_first_parent(&self, commit: &CommitId) -> Result<bool> {
        Ok(self.lookup(commit)?.changes_content)
    }
}

/// Progress callback that remembers every message
#[derive(Default)]
pub struct RecordingProgress {
    messages: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl ProgressCallback for RecordingProgress {
    fn on_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
