//! Removal of absorbed local copies
//!
//! Only directories directly inside each folder are removed (the `.git`
//! directory included); plain files and symlinks stay where they are.
//! A folder absorbed in place is now part of the target's tree, so only its
//! `.git` directory goes.

use crate::types::{AbsorbReport, CleanupFailure, CleanupReport, FolderCleanup};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Clean every folder the report marks as absorbed
///
/// Best-effort: failures are recorded and the remaining entries are still
/// processed.
pub fn clean_absorbed(report: &AbsorbReport) -> CleanupReport {
    CleanupReport {
        folders: report
            .absorbed()
            .map(|outcome| {
                if outcome.in_place {
                    clean_in_place(&outcome.path)
                } else {
                    clean_folder(&outcome.path)
                }
            })
            .collect(),
    }
}

/// Remove only the `.git` directory of a folder absorbed in place
pub fn clean_in_place(folder: &Path) -> FolderCleanup {
    let mut result = FolderCleanup {
        folder: folder.to_path_buf(),
        ..FolderCleanup::default()
    };

    let git_dir = folder.join(".git");
    match fs::symlink_metadata(&git_dir) {
        Ok(meta) if meta.is_dir() => remove_dir(git_dir, &mut result),
        Ok(_) => debug!(path = %git_dir.display(), "not a directory, left alone"),
        Err(e) => result.failed.push(CleanupFailure {
            path: git_dir,
            message: e.to_string(),
        }),
    }

    result
}

/// Remove the subdirectories of a single folder
pub fn clean_folder(folder: &Path) -> FolderCleanup {
    let mut result = FolderCleanup {
        folder: folder.to_path_buf(),
        ..FolderCleanup::default()
    };

    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(folder = %folder.display(), error = %e, "cannot read folder for cleanup");
            result.failed.push(CleanupFailure {
                path: folder.to_path_buf(),
                message: e.to_string(),
            });
            return result;
        }
    };

    let mut dirs = Vec::new();
    for entry in entries {
        match entry.and_then(|e| Ok((e.path(), e.file_type()?))) {
            // DirEntry::file_type does not follow symlinks
            Ok((path, kind)) if kind.is_dir() => dirs.push(path),
            Ok(_) => {}
            Err(e) => result.failed.push(CleanupFailure {
                path: folder.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }
    dirs.sort();

    for dir in dirs {
        remove_dir(dir, &mut result);
    }

    result
}

fn remove_dir(dir: PathBuf, result: &mut FolderCleanup) {
    match fs::remove_dir_all(&dir) {
        Ok(()) => {
            debug!(path = %dir.display(), "removed");
            result.removed.push(dir);
        }
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "failed to remove directory");
            result.failed.push(CleanupFailure {
                path: dir,
                message: e.to_string(),
            });
        }
    }
}
