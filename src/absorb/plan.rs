//! Absorption planning - pure functions for creating absorption plans
//!
//! No I/O happens here - all facts are gathered beforehand, making the
//! skip rules easy to unit test.

use crate::types::{FolderInfo, SourceFolder};
use std::collections::HashSet;
use std::fmt;

/// A single step in the absorption plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsorbStep {
    /// Absorb this folder
    Absorb {
        /// Folder to absorb
        folder: SourceFolder,
        /// Branch fetched from the folder
        branch: String,
        /// Folder's checkout already sits at the prefix in the target
        in_place: bool,
    },
    /// Leave this folder alone
    Skip {
        /// Folder that is skipped
        folder: SourceFolder,
        /// Reasons it cannot be absorbed
        reasons: Vec<String>,
    },
}

impl AbsorbStep {
    /// Folder this step applies to
    pub const fn folder(&self) -> &SourceFolder {
        match self {
            Self::Absorb { folder, .. } | Self::Skip { folder, .. } => folder,
        }
    }
}

impl fmt::Display for AbsorbStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absorb {
                folder,
                branch,
                in_place,
            } => {
                write!(
                    f,
                    "absorb {} ({branch}) into {}",
                    folder.path.display(),
                    folder.prefix()
                )?;
                if *in_place {
                    write!(f, " in place")?;
                }
                Ok(())
            }
            Self::Skip { folder, reasons } => {
                write!(f, "skip {}", folder.path.display())?;
                if !reasons.is_empty() {
                    write!(f, ": {}", reasons.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

/// Absorption plan, in argument order
#[derive(Debug, Clone, Default)]
pub struct AbsorbPlan {
    /// Steps to perform (or skip)
    pub steps: Vec<AbsorbStep>,
}

impl AbsorbPlan {
    /// Check if the plan absorbs nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.absorb_count() == 0
    }

    /// Count folders that will be absorbed
    #[must_use]
    pub fn absorb_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, AbsorbStep::Absorb { .. }))
            .count()
    }
}

/// Create an absorption plan (PURE - no I/O)
///
/// A folder is skipped when it does not exist, is not a repository, is the
/// target itself, would land on a path the target already tracks, or shares
/// its name with a folder planned earlier in the same run.
#[must_use]
pub fn create_absorb_plan(infos: &[FolderInfo]) -> AbsorbPlan {
    let mut steps = Vec::with_capacity(infos.len());
    let mut planned_names: HashSet<&str> = HashSet::new();

    for info in infos {
        let folder = &info.folder;

        if !info.exists {
            steps.push(AbsorbStep::Skip {
                folder: folder.clone(),
                reasons: vec!["folder does not exist".to_string()],
            });
            continue;
        }

        let mut reasons = Vec::new();
        if !info.is_repository {
            reasons.push("not a git repository".to_string());
        }
        if info.is_target {
            reasons.push("folder is the target repository".to_string());
        }
        if info.name_taken {
            reasons.push(format!("'{}' already exists in the target", folder.name));
        }
        if planned_names.contains(folder.name.as_str()) {
            reasons.push(format!(
                "another folder named '{}' is absorbed earlier",
                folder.name
            ));
        }

        if reasons.is_empty() {
            planned_names.insert(folder.name.as_str());
            steps.push(AbsorbStep::Absorb {
                folder: folder.clone(),
                branch: info.branch.clone(),
                in_place: info.in_place,
            });
        } else {
            steps.push(AbsorbStep::Skip {
                folder: folder.clone(),
                reasons,
            });
        }
    }

    AbsorbPlan { steps }
}
