//! Read-only inspection of source repositories

use crate::error::{Error, Result};
use std::path::Path;
use tracing::debug;

/// What is known about a source folder before absorbing it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceInspection {
    /// The path exists and is a directory
    pub exists: bool,
    /// The directory is itself a git repository
    pub is_repository: bool,
    /// Short name of the branch HEAD points at, if any
    pub head_branch: Option<String>,
}

/// Inspect a source folder without modifying it
///
/// A directory that merely sits inside some other repository is not a
/// repository here: the folder itself must hold the `.git` entry.
pub fn inspect_source(path: &Path) -> Result<SourceInspection> {
    if !path.is_dir() {
        return Ok(SourceInspection::default());
    }

    let repo = match gix::open(path) {
        Ok(repo) => repo,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "not a git repository");
            return Ok(SourceInspection {
                exists: true,
                ..SourceInspection::default()
            });
        }
    };

    let head_branch = repo
        .head_name()
        .map_err(|e| Error::SourceInspection {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .map(|name| name.shorten().to_string());

    Ok(SourceInspection {
        exists: true,
        is_repository: true,
        head_branch,
    })
}
