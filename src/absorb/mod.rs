//! Absorption engine
//!
//! Three-phase pattern:
//! 1. Gather - inspect sources and the target (effectful, read-only)
//! 2. Plan - decide per folder whether to absorb or skip (pure, testable)
//! 3. Execute - fetch, merge, graft and commit (effectful)

mod execute;
mod gather;
mod plan;

pub use execute::{absorb_folder, execute_absorb_plan};
pub use gather::gather_folder_info;
pub use plan::{AbsorbPlan, AbsorbStep, create_absorb_plan};

use crate::types::{FolderOutcome, SourceFolder};

/// Progress reporting for absorption
///
/// Allows the CLI to show spinners while library code stays free of
/// terminal concerns.
pub trait ProgressCallback {
    /// Called before the source of `folder` is fetched
    fn on_absorb_started(&self, folder: &SourceFolder, branch: &str);

    /// Called once per folder with its final outcome, skipped folders included
    fn on_absorb_finished(&self, outcome: &FolderOutcome);
}
