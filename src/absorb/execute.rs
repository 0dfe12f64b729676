//! Absorption execution - effectful operations
//!
//! Takes an `AbsorbPlan` (created by the pure planning functions) and runs
//! the git operations for each folder against the target repository.

use crate::absorb::ProgressCallback;
use crate::absorb::plan::{AbsorbPlan, AbsorbStep};
use crate::repo::TargetRepository;
use crate::types::{AbsorbReport, AbsorbStage, AbsorbStatus, FolderOutcome, SourceFolder};
use tracing::{info, warn};

/// Execute the absorption plan (EFFECTFUL)
///
/// Every step runs, in order. A failed folder does not stop later ones; the
/// failure is recorded in its outcome instead. Cleanup is not part of this.
pub fn execute_absorb_plan(
    plan: &AbsorbPlan,
    target: &dyn TargetRepository,
    progress: &dyn ProgressCallback,
) -> AbsorbReport {
    let mut report = AbsorbReport::default();

    for step in &plan.steps {
        let status = match step {
            AbsorbStep::Absorb {
                folder,
                branch,
                in_place,
            } => {
                progress.on_absorb_started(folder, branch);
                absorb_folder(target, folder, branch, *in_place)
            }
            AbsorbStep::Skip { reasons, .. } => AbsorbStatus::Skipped {
                reasons: reasons.clone(),
            },
        };

        let folder = step.folder();
        let outcome = FolderOutcome {
            name: folder.name.clone(),
            path: folder.path.clone(),
            in_place: matches!(step, AbsorbStep::Absorb { in_place: true, .. }),
            status,
        };
        info!(folder = %outcome.name, status = ?outcome.status, "folder processed");

        progress.on_absorb_finished(&outcome);
        report.outcomes.push(outcome);
    }

    report
}

/// Absorb one folder into the target
///
/// Fetches `branch`, records an unrelated-history merge that keeps the
/// target's content, grafts the fetched tree under `<name>/` and commits it
/// as `Absorbed <name>.`. If anything fails once the merge has started, the
/// merge is aborted so the next folder starts from a clean index.
///
/// With `in_place` the folder's checkout already occupies `<name>/` in the
/// target work tree, so only the index is updated.
pub fn absorb_folder(
    target: &dyn TargetRepository,
    folder: &SourceFolder,
    branch: &str,
    in_place: bool,
) -> AbsorbStatus {
    let fetched = match target.fetch(&folder.path, branch) {
        Ok(commit) => commit,
        Err(e) => return failed(AbsorbStage::Fetch, &e),
    };

    if let Err(e) = target.merge_keep_ours(&fetched) {
        return failed(AbsorbStage::Merge, &e);
    }

    if let Err(e) = target.read_tree_prefixed(&folder.prefix(), &fetched, !in_place) {
        abort_merge(target, folder);
        return failed(AbsorbStage::ReadTree, &e);
    }

    match target.commit(&folder.commit_message()) {
        Ok(commit) => AbsorbStatus::Absorbed { fetched, commit },
        Err(e) => {
            abort_merge(target, folder);
            failed(AbsorbStage::Commit, &e)
        }
    }
}

fn failed(stage: AbsorbStage, error: &crate::error::Error) -> AbsorbStatus {
    AbsorbStatus::Failed {
        stage,
        message: error.to_string(),
    }
}

fn abort_merge(target: &dyn TargetRepository, folder: &SourceFolder) {
    if let Err(e) = target.abort_merge() {
        warn!(folder = %folder.name, error = %e, "failed to abort merge; target may need `git merge --abort`");
    }
}
