//! Mock target repository for testing
//!
//! These are test utilities - not all may be used in current tests.

#![allow(dead_code)]

use git_absorb::absorb::ProgressCallback;
use git_absorb::error::{Error, Result};
use git_absorb::repo::TargetRepository;
use git_absorb::types::{FolderOutcome, SourceFolder};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A recorded call on the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoCall {
    Fetch { source: PathBuf, branch: String },
    Merge { commit: String },
    ReadTree {
        prefix: String,
        commit: String,
        update_work_tree: bool,
    },
    Commit { message: String },
    AbortMerge,
}

/// In-memory `TargetRepository`
///
/// Features:
/// - Fetched commit ids derived from the source folder name
/// - Sequential commit ids
/// - Call tracking for verification
/// - Error injection per operation
pub struct MockRepository {
    root: PathBuf,
    tracked: Mutex<HashSet<String>>,
    calls: Mutex<Vec<RepoCall>>,
    commits: Mutex<u32>,
    // Error injection
    error_on_fetch: Mutex<HashSet<PathBuf>>,
    error_on_merge: Mutex<Option<String>>,
    error_on_read_tree: Mutex<Option<String>>,
    error_on_commit: Mutex<Option<String>>,
}

impl MockRepository {
    /// Create a mock rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            tracked: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
            commits: Mutex::new(0),
            error_on_fetch: Mutex::new(HashSet::new()),
            error_on_merge: Mutex::new(None),
            error_on_read_tree: Mutex::new(None),
            error_on_commit: Mutex::new(None),
        }
    }

    /// Mark a top-level path as tracked in HEAD
    pub fn track(&self, path: &str) {
        self.tracked.lock().unwrap().insert(path.to_string());
    }

    // === Error injection methods ===

    /// Make `fetch` fail for this source
    pub fn fail_fetch(&self, source: impl Into<PathBuf>) {
        self.error_on_fetch.lock().unwrap().insert(source.into());
    }

    /// Make every `merge_keep_ours` fail
    pub fn fail_merge(&self, msg: &str) {
        *self.error_on_merge.lock().unwrap() = Some(msg.to_string());
    }

    /// Make every `read_tree_prefixed` fail
    pub fn fail_read_tree(&self, msg: &str) {
        *self.error_on_read_tree.lock().unwrap() = Some(msg.to_string());
    }

    /// Make every `commit` fail
    pub fn fail_commit(&self, msg: &str) {
        *self.error_on_commit.lock().unwrap() = Some(msg.to_string());
    }

    // === Call tracking ===

    /// All calls, in order
    pub fn calls(&self) -> Vec<RepoCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of `abort_merge` calls
    pub fn abort_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, RepoCall::AbortMerge))
            .count()
    }

    fn record(&self, call: RepoCall) {
        self.calls.lock().unwrap().push(call);
    }
}

fn git_error(command: &str, msg: &str) -> Error {
    Error::Git {
        command: command.to_string(),
        stderr: msg.to_string(),
    }
}

impl TargetRepository for MockRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn has_tracked_path(&self, path: &str) -> Result<bool> {
        Ok(self.tracked.lock().unwrap().contains(path))
    }

    fn fetch(&self, source: &Path, branch: &str) -> Result<String> {
        self.record(RepoCall::Fetch {
            source: source.to_path_buf(),
            branch: branch.to_string(),
        });
        if self.error_on_fetch.lock().unwrap().contains(source) {
            return Err(git_error(
                "fetch",
                &format!("couldn't find remote ref {branch}"),
            ));
        }
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(format!("fetched-{name}"))
    }

    fn merge_keep_ours(&self, commit: &str) -> Result<()> {
        self.record(RepoCall::Merge {
            commit: commit.to_string(),
        });
        match self.error_on_merge.lock().unwrap().as_deref() {
            Some(msg) => Err(git_error("merge", msg)),
            None => Ok(()),
        }
    }

    fn read_tree_prefixed(&self, prefix: &str, commit: &str, update_work_tree: bool) -> Result<()> {
        self.record(RepoCall::ReadTree {
            prefix: prefix.to_string(),
            commit: commit.to_string(),
            update_work_tree,
        });
        match self.error_on_read_tree.lock().unwrap().as_deref() {
            Some(msg) => Err(git_error("read-tree", msg)),
            None => Ok(()),
        }
    }

    fn commit(&self, message: &str) -> Result<String> {
        self.record(RepoCall::Commit {
            message: message.to_string(),
        });
        if let Some(msg) = self.error_on_commit.lock().unwrap().as_deref() {
            return Err(git_error("commit", msg));
        }
        let mut commits = self.commits.lock().unwrap();
        *commits += 1;
        Ok(format!("commit-{commits}"))
    }

    fn abort_merge(&self) -> Result<()> {
        self.record(RepoCall::AbortMerge);
        Ok(())
    }
}

/// Progress callback that records events as strings
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<String>>,
}

impl RecordingProgress {
    /// Recorded events, in order
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressCallback for RecordingProgress {
    fn on_absorb_started(&self, folder: &SourceFolder, branch: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("start {} {branch}", folder.name));
    }

    fn on_absorb_finished(&self, outcome: &FolderOutcome) {
        let kind = match outcome.status {
            git_absorb::types::AbsorbStatus::Absorbed { .. } => "absorbed",
            git_absorb::types::AbsorbStatus::Skipped { .. } => "skipped",
            git_absorb::types::AbsorbStatus::Failed { .. } => "failed",
        };
        self.events
            .lock()
            .unwrap()
            .push(format!("{kind} {}", outcome.name));
    }
}
