//! Shared command context
//!
//! Extracts the setup every absorb run needs before any folder is touched.

use git_absorb::error::Result;
use git_absorb::repo::GitRepo;
use git_absorb::resolve::resolve_folders;
use git_absorb::types::SourceFolder;
use std::path::Path;

/// Resolved folders plus a target repository that is ready for merges
///
/// Building this performs all fatal checks:
/// - at least one folder argument resolves
/// - the working directory is inside a git work tree
/// - the target has a commit and no merge in progress
/// - nothing is staged, unless this is a dry run
pub struct CommandContext {
    /// The target repository
    pub repo: GitRepo,
    /// Folders to absorb, in argument order
    pub folders: Vec<SourceFolder>,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(cwd: &Path, raw_folders: &[String], dry_run: bool) -> Result<Self> {
        let folders = resolve_folders(raw_folders, cwd)?;

        let repo = GitRepo::discover(cwd)?;
        repo.ensure_ready()?;
        if !dry_run {
            repo.ensure_nothing_staged()?;
        }

        Ok(Self { repo, folders })
    }
}
