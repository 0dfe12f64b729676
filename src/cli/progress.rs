//! Console progress for the absorb command

use crate::cli::style::{Stylize, check, cross, spinner_style};
use anstream::println;
use git_absorb::absorb::ProgressCallback;
use git_absorb::types::{AbsorbStatus, FolderOutcome, SourceFolder};
use indicatif::ProgressBar;
use std::cell::RefCell;
use std::time::Duration;

/// Prints one line per folder and spins while git works
pub struct CliProgress {
    quiet: bool,
    spinner: RefCell<Option<ProgressBar>>,
}

impl CliProgress {
    /// Progress with console output
    pub const fn new() -> Self {
        Self {
            quiet: false,
            spinner: RefCell::new(None),
        }
    }

    /// Progress that prints nothing (machine-readable output mode)
    pub const fn quiet() -> Self {
        Self {
            quiet: true,
            spinner: RefCell::new(None),
        }
    }
}

impl ProgressCallback for CliProgress {
    fn on_absorb_started(&self, folder: &SourceFolder, branch: &str) {
        if self.quiet {
            return;
        }

        println!(
            "{} {} {}",
            "Absorbing".emphasis(),
            folder.name.accent(),
            format!("({branch} from {})", folder.path.display()).muted()
        );

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.set_message("fetching and merging...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        *self.spinner.borrow_mut() = Some(spinner);
    }

    fn on_absorb_finished(&self, outcome: &FolderOutcome) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }
        if self.quiet {
            return;
        }

        match &outcome.status {
            AbsorbStatus::Absorbed { commit, .. } => println!(
                "  {} Absorbed {} into {}/ {}",
                check(),
                outcome.name.accent(),
                outcome.name,
                short(commit).muted()
            ),
            AbsorbStatus::Skipped { reasons } => println!(
                "{} {} {}",
                "Skipping".warn(),
                outcome.name.accent(),
                format!("({})", reasons.join(", ")).muted()
            ),
            AbsorbStatus::Failed { stage, message } => {
                println!(
                    "  {} {} failed during {stage}",
                    cross(),
                    outcome.name.accent()
                );
                println!("    {}", message.muted());
            }
        }
    }
}

fn short(commit: &str) -> &str {
    commit.get(..7).unwrap_or(commit)
}
