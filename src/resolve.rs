//! Folder argument resolution
//!
//! Turns the raw folder arguments into [`SourceFolder`]s. Relative arguments
//! are joined to the working directory and normalized without touching the
//! filesystem; existence is checked later, when facts are gathered.

use crate::error::{Error, Result};
use crate::types::SourceFolder;
use std::path::{Component, Path, PathBuf};

/// Resolve folder arguments against `cwd`, preserving argument order
///
/// # Errors
/// `NoSourceFolders` if `raw` is empty, `InvalidFolder` if an argument has
/// no final path segment (for example `/`).
pub fn resolve_folders<S: AsRef<str>>(raw: &[S], cwd: &Path) -> Result<Vec<SourceFolder>> {
    if raw.is_empty() {
        return Err(Error::NoSourceFolders);
    }

    raw.iter()
        .map(|arg| resolve_folder(arg.as_ref(), cwd))
        .collect()
}

/// Resolve a single folder argument
pub fn resolve_folder(raw: &str, cwd: &Path) -> Result<SourceFolder> {
    let given = Path::new(raw);
    let joined = if given.is_absolute() {
        given.to_path_buf()
    } else {
        cwd.join(given)
    };
    let path = normalize(&joined);

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| Error::InvalidFolder(raw.to_string()))?
        .to_string();

    Ok(SourceFolder {
        raw: raw.to_string(),
        path,
        name,
    })
}

/// Remove `.` and `..` components without resolving symlinks
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                if !matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    continue;
                }
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
