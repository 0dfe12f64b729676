//! Core types for git-absorb

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Branch taken from a source repository when nothing better is known
pub const FALLBACK_BRANCH: &str = "master";

/// One external repository named on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFolder {
    /// Argument exactly as given
    pub raw: String,
    /// Absolute, lexically normalized path
    pub path: PathBuf,
    /// Last path segment; target subdirectory and commit subject
    pub name: String,
}

impl SourceFolder {
    /// Subdirectory prefix used when grafting the fetched tree
    pub fn prefix(&self) -> String {
        format!("{}/", self.name)
    }

    /// Commit message recorded for this folder
    pub fn commit_message(&self) -> String {
        format!("Absorbed {}.", self.name)
    }
}

/// Options that apply to a whole run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Delete local copies of absorbed folders afterwards
    pub clean: bool,
    /// Branch to take from every source instead of detecting it
    pub branch: Option<String>,
}

/// Facts collected about a folder before planning
///
/// Produced by the gather phase so that planning stays free of I/O.
#[derive(Debug, Clone)]
pub struct FolderInfo {
    /// The folder itself
    pub folder: SourceFolder,
    /// Whether the path exists as a directory
    pub exists: bool,
    /// Whether the directory is the root of a git repository
    pub is_repository: bool,
    /// Whether the folder is the target repository itself
    pub is_target: bool,
    /// Whether `<name>` is already tracked in the target's HEAD
    pub name_taken: bool,
    /// Whether the folder sits at `<target root>/<name>`, so its checkout
    /// already occupies the subdirectory it will be grafted into
    pub in_place: bool,
    /// Branch that will be fetched
    pub branch: String,
}

/// Step of an absorption that can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AbsorbStage {
    /// Fetching the source branch
    Fetch,
    /// Recording the unrelated-history merge
    Merge,
    /// Grafting the fetched tree under the prefix
    ReadTree,
    /// Committing the merge
    Commit,
}

impl fmt::Display for AbsorbStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fetch => "fetch",
            Self::Merge => "merge",
            Self::ReadTree => "read-tree",
            Self::Commit => "commit",
        };
        f.write_str(name)
    }
}

/// What happened to a single folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum AbsorbStatus {
    /// History merged and committed
    Absorbed {
        /// Commit fetched from the source
        fetched: String,
        /// Merge commit created in the target
        commit: String,
    },
    /// Not attempted
    Skipped {
        /// Why the folder was not attempted
        reasons: Vec<String>,
    },
    /// Attempted and failed
    Failed {
        /// Step that failed
        stage: AbsorbStage,
        /// Error message from that step
        message: String,
    },
}

/// Result of processing one folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderOutcome {
    /// Base name of the folder
    pub name: String,
    /// Resolved path of the folder
    pub path: PathBuf,
    /// Folder was checked out inside the target at its own prefix
    pub in_place: bool,
    /// Outcome
    #[serde(flatten)]
    pub status: AbsorbStatus,
}

impl FolderOutcome {
    /// Check if the folder was absorbed
    #[must_use]
    pub const fn is_absorbed(&self) -> bool {
        matches!(self.status, AbsorbStatus::Absorbed { .. })
    }
}

/// A path that could not be removed during cleanup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupFailure {
    /// Path that was left behind
    pub path: PathBuf,
    /// Error message
    pub message: String,
}

/// Cleanup result for one folder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FolderCleanup {
    /// Folder that was cleaned
    pub folder: PathBuf,
    /// Subdirectories that were removed
    pub removed: Vec<PathBuf>,
    /// Entries that could not be removed
    pub failed: Vec<CleanupFailure>,
}

/// Cleanup result for a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    /// One entry per cleaned folder, in argument order
    pub folders: Vec<FolderCleanup>,
}

impl CleanupReport {
    /// Iterate over every failure across all folders
    pub fn failures(&self) -> impl Iterator<Item = &CleanupFailure> {
        self.folders.iter().flat_map(|f| f.failed.iter())
    }
}

/// Aggregated result of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AbsorbReport {
    /// One outcome per folder, in argument order
    pub outcomes: Vec<FolderOutcome>,
    /// Present when cleanup ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup: Option<CleanupReport>,
}

impl AbsorbReport {
    /// Check if every folder was absorbed
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(FolderOutcome::is_absorbed)
    }

    /// Outcomes of the folders that were absorbed
    pub fn absorbed(&self) -> impl Iterator<Item = &FolderOutcome> {
        self.outcomes.iter().filter(|o| o.is_absorbed())
    }

    /// Number of folders absorbed
    #[must_use]
    pub fn absorbed_count(&self) -> usize {
        self.absorbed().count()
    }
}
