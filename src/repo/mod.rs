//! Repository access
//!
//! The target repository is driven through the [`TargetRepository`] trait so
//! the absorption logic can run against the real `git` binary or a test double.
//! Source repositories are only inspected, never modified.

mod git;
mod source;

pub use git::GitRepo;
pub use source::{SourceInspection, inspect_source};

use crate::error::Result;
use std::path::Path;

/// Operations the absorption engine needs from the target repository
///
/// Every mutating method leaves the repository the way git leaves it after
/// the equivalent command. Callers are responsible for ordering.
pub trait TargetRepository {
    /// Root of the target's work tree
    fn root(&self) -> &Path;

    /// Whether `path` (relative to the root) is tracked in HEAD
    fn has_tracked_path(&self, path: &str) -> Result<bool>;

    /// Fetch `branch` from the repository at `source` without touching the
    /// work tree or the current branch, returning the fetched commit id
    fn fetch(&self, source: &Path, branch: &str) -> Result<String>;

    /// Start a merge of `commit` that keeps our content, allows unrelated
    /// histories and stops before committing
    fn merge_keep_ours(&self, commit: &str) -> Result<()>;

    /// Read the tree of `commit` into the index under `prefix`, checking the
    /// new paths out into the work tree when `update_work_tree` is set
    fn read_tree_prefixed(&self, prefix: &str, commit: &str, update_work_tree: bool)
    -> Result<()>;

    /// Commit the index quietly, returning the new commit id
    fn commit(&self, message: &str) -> Result<String>;

    /// Abandon an in-progress merge
    fn abort_merge(&self) -> Result<()>;
}
