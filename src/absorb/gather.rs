//! Fact gathering - read-only inspection ahead of planning

use crate::error::Result;
use crate::repo::{TargetRepository, inspect_source};
use crate::types::{FALLBACK_BRANCH, FolderInfo, RunOptions, SourceFolder};
use std::fs;
use std::path::Path;

/// Collect what the planner needs to know about each folder
///
/// The branch is taken from `options.branch` when set, otherwise from the
/// source's HEAD, otherwise [`FALLBACK_BRANCH`].
pub fn gather_folder_info(
    target: &dyn TargetRepository,
    folders: &[SourceFolder],
    options: &RunOptions,
) -> Result<Vec<FolderInfo>> {
    let mut infos = Vec::with_capacity(folders.len());

    for folder in folders {
        let inspection = inspect_source(&folder.path)?;
        let is_target = inspection.exists && same_directory(&folder.path, target.root());
        let in_place =
            inspection.exists && same_directory(&folder.path, &target.root().join(&folder.name));
        let name_taken = target.has_tracked_path(&folder.name)?;

        let branch = options
            .branch
            .clone()
            .or(inspection.head_branch)
            .unwrap_or_else(|| FALLBACK_BRANCH.to_string());

        infos.push(FolderInfo {
            folder: folder.clone(),
            exists: inspection.exists,
            is_repository: inspection.is_repository,
            is_target,
            name_taken,
            in_place,
            branch,
        });
    }

    Ok(infos)
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
