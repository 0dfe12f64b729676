//! Error types for git-absorb

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while absorbing repositories
#[derive(Debug, Error)]
pub enum Error {
    /// No folder arguments were given
    #[error("no source folder provided")]
    NoSourceFolders,

    /// A folder argument has no usable base name
    #[error("invalid folder '{0}': cannot determine a directory name")]
    InvalidFolder(String),

    /// The working directory is not inside a git work tree
    #[error("not inside a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    /// The target repository has no commit to merge into
    #[error("target repository has no commits yet; create an initial commit first")]
    EmptyRepository,

    /// A previous merge was left unfinished in the target repository
    #[error("a merge is already in progress in the target repository; finish or abort it first")]
    MergeInProgress,

    /// The index contains changes that would leak into absorption commits
    #[error("target repository has staged changes; commit or unstage them first")]
    StagedChanges,

    /// A git command exited unsuccessfully
    #[error("git {command} failed: {stderr}")]
    Git {
        /// Subcommand and arguments, space separated
        command: String,
        /// Trimmed stderr of the failed command
        stderr: String,
    },

    /// A source repository could not be inspected
    #[error("failed to inspect {}: {message}", .path.display())]
    SourceInspection {
        /// Folder that was inspected
        path: PathBuf,
        /// Underlying error message
        message: String,
    },

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
