//! CLI argument parsing and command dispatch

mod absorb;
mod context;
mod progress;
pub mod style;

pub use absorb::{AbsorbOptions, run_absorb};

use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use git_absorb::types::RunOptions;
use std::ffi::OsString;

/// Absorb other git repositories into this one, keeping their history
#[derive(Parser, Debug)]
#[command(
    name = "git-absorb",
    bin_name = "git absorb",
    version,
    about,
    override_usage = "git absorb [FOLDER ...] [OPTIONS]",
    after_help = "Each FOLDER is merged with its full history into a subdirectory named after it,\none commit per folder."
)]
pub struct Cli {
    /// Repositories to absorb, in order
    #[arg(value_name = "FOLDER")]
    pub folders: Vec<String>,

    /// Delete the subdirectories of absorbed folders afterwards
    #[arg(short, long)]
    pub clean: bool,

    /// Branch to take from every source (default: its checked-out branch, else master)
    #[arg(short, long, value_name = "NAME")]
    pub branch: Option<String>,

    /// Show what would be absorbed without changing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Show the plan and ask before absorbing
    #[arg(long, conflicts_with = "dry_run")]
    pub confirm: bool,

    /// Print the final report as JSON
    #[arg(long, conflicts_with_all = ["dry_run", "confirm"])]
    pub json: bool,
}

/// Argument ids of every option, as derived from the field names
const OPTION_IDS: [&str; 5] = ["clean", "branch", "dry_run", "confirm", "json"];

impl Cli {
    /// Parse arguments, requiring every folder to come before the first option
    ///
    /// # Errors
    /// Returns the clap error for help/version requests as well as for
    /// invalid input; `Error::use_stderr` tells them apart.
    pub fn parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        check_folders_precede_options(&matches)?;
        Self::from_arg_matches(&matches)
    }

    /// Convert parsed arguments into command options
    pub fn into_options(self) -> AbsorbOptions {
        AbsorbOptions {
            folders: self.folders,
            run: RunOptions {
                clean: self.clean,
                branch: self.branch,
            },
            dry_run: self.dry_run,
            confirm: self.confirm,
            json: self.json,
        }
    }
}

fn check_folders_precede_options(matches: &ArgMatches) -> Result<(), clap::Error> {
    let first_option = OPTION_IDS
        .iter()
        .filter(|id| matches.value_source(id) == Some(ValueSource::CommandLine))
        .filter_map(|id| matches.index_of(id))
        .min();
    let Some(first_option) = first_option else {
        return Ok(());
    };

    let Some(indices) = matches.indices_of("folders") else {
        return Ok(());
    };
    let folders: Vec<&String> = matches
        .get_many::<String>("folders")
        .map(Iterator::collect)
        .unwrap_or_default();

    for (index, folder) in indices.zip(folders) {
        if index > first_option {
            return Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                format!("folder '{folder}' must come before any option"),
            ));
        }
    }

    Ok(())
}
