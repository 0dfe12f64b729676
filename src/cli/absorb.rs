//! Absorb command - merge source repositories into the current one

use crate::cli::context::CommandContext;
use crate::cli::progress::CliProgress;
use crate::cli::style::{CHECK, Stylize, arrow, check};
use anstream::println;
use dialoguer::Confirm;
use git_absorb::absorb::{
    AbsorbPlan, AbsorbStep, create_absorb_plan, execute_absorb_plan, gather_folder_info,
};
use git_absorb::cleanup::clean_absorbed;
use git_absorb::error::{Error, Result};
use git_absorb::types::{AbsorbReport, AbsorbStatus, CleanupReport, RunOptions};
use std::path::Path;

/// Options for the absorb command
#[derive(Debug, Clone, Default)]
pub struct AbsorbOptions {
    /// Folder arguments, unresolved
    pub folders: Vec<String>,
    /// Options that shape the run itself
    pub run: RunOptions,
    /// Print the plan only
    pub dry_run: bool,
    /// Print the plan and prompt before executing
    pub confirm: bool,
    /// Print the report as JSON instead of a summary
    pub json: bool,
}

/// Run the absorb command
///
/// Returns `true` when every folder was absorbed, or when nothing was
/// attempted because of `--dry-run` or a declined prompt.
pub fn run_absorb(cwd: &Path, options: &AbsorbOptions) -> Result<bool> {
    // =========================================================================
    // Phase 1: GATHER - resolve, check the target, inspect every source
    // =========================================================================

    let ctx = CommandContext::new(cwd, &options.folders, options.dry_run)?;
    let infos = gather_folder_info(&ctx.repo, &ctx.folders, &options.run)?;

    // =========================================================================
    // Phase 2: PLAN - pure
    // =========================================================================

    let plan = create_absorb_plan(&infos);

    if options.dry_run {
        report_dry_run(&plan, &options.run);
        return Ok(true);
    }

    if options.confirm {
        report_dry_run(&plan, &options.run);
        if plan.is_empty() {
            return Ok(false);
        }
        if !Confirm::new()
            .with_prompt("Proceed with absorption?")
            .default(true)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?
        {
            println!("{}", "Aborted".muted());
            return Ok(true);
        }
        println!();
    }

    // =========================================================================
    // Phase 3: EXECUTE - absorb, then clean up what was absorbed
    // =========================================================================

    let progress = if options.json {
        CliProgress::quiet()
    } else {
        CliProgress::new()
    };
    let mut report = execute_absorb_plan(&plan, &ctx.repo, &progress);

    if options.run.clean {
        let cleanup = clean_absorbed(&report);
        report.cleanup = Some(cleanup);
    }

    if options.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| Error::Internal(format!("failed to serialize report: {e}")))?;
        std::println!("{json}");
    } else {
        print_summary(&report);
    }

    Ok(report.is_success())
}

/// Print the plan for --dry-run and --confirm
fn report_dry_run(plan: &AbsorbPlan, run: &RunOptions) {
    println!("{}:", "Absorption plan".emphasis());
    println!();

    for step in &plan.steps {
        match step {
            AbsorbStep::Absorb {
                folder,
                branch,
                in_place,
            } => {
                println!(
                    "  {} {} {}",
                    "✓ Would absorb".success(),
                    folder.name.accent(),
                    format!("({branch} from {})", folder.path.display()).muted()
                );
                if *in_place {
                    println!("    {} {} {}", arrow(), folder.prefix(), "(in place)".muted());
                } else {
                    println!("    {} {}", arrow(), folder.prefix());
                }
            }
            AbsorbStep::Skip { folder, reasons } => {
                println!(
                    "  {} {}",
                    "✗ Would skip".warn(),
                    folder.path.display()
                );
                for reason in reasons {
                    println!("    - {}", reason.muted());
                }
            }
        }
    }

    println!();
    if plan.is_empty() {
        println!("{}", "Nothing can be absorbed.".muted());
    } else if run.clean {
        println!(
            "{}",
            "Subdirectories of absorbed folders would be deleted afterwards (--clean).".muted()
        );
    }
}

/// Print the final summary
fn print_summary(report: &AbsorbReport) {
    println!();
    if report.is_success() {
        println!(
            "{} {} folder(s) absorbed",
            format!("{CHECK} Absorption complete:").success(),
            report.absorbed_count().accent()
        );
    } else {
        println!(
            "{} {} of {} folder(s) absorbed",
            "⚠️  Absorption incomplete:".warn(),
            report.absorbed_count().accent(),
            report.outcomes.len()
        );
        for outcome in &report.outcomes {
            match &outcome.status {
                AbsorbStatus::Absorbed { .. } => {}
                AbsorbStatus::Skipped { reasons } => println!(
                    "   {} {} ({})",
                    "Skipped:".warn(),
                    outcome.name,
                    reasons.join(", ").muted()
                ),
                AbsorbStatus::Failed { stage, message } => {
                    println!("   {} {} during {stage}", "Failed:".warn(), outcome.name);
                    println!("          {}", message.muted());
                }
            }
        }
    }

    if let Some(cleanup) = &report.cleanup {
        print_cleanup(cleanup);
    }
}

fn print_cleanup(cleanup: &CleanupReport) {
    let removed: usize = cleanup.folders.iter().map(|f| f.removed.len()).sum();
    println!(
        "{} Removed {} director{} from {} absorbed folder(s)",
        check(),
        removed.accent(),
        if removed == 1 { "y" } else { "ies" },
        cleanup.folders.len()
    );
    for failure in cleanup.failures() {
        println!(
            "   {} {} ({})",
            "Could not remove:".warn(),
            failure.path.display(),
            failure.message.muted()
        );
    }
}
