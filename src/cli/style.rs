//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips the escapes again when
//! stdout is not a terminal.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use std::fmt::Display;

/// Check mark used for completed steps
pub const CHECK: &str = "✓";

/// Cross used for failed steps
pub const CROSS: &str = "✗";

/// Semantic styles for console output
pub trait Stylize {
    /// Bold, for headings and verbs
    fn emphasis(&self) -> String;
    /// Cyan, for names the user typed
    fn accent(&self) -> String;
    /// Dimmed, for secondary detail
    fn muted(&self) -> String;
    /// Green
    fn success(&self) -> String;
    /// Yellow
    fn warn(&self) -> String;
    /// Bold red
    fn error(&self) -> String;
}

impl<T: Display + ?Sized> Stylize for T {
    fn emphasis(&self) -> String {
        self.to_string().bold().to_string()
    }

    fn accent(&self) -> String {
        self.to_string().cyan().to_string()
    }

    fn muted(&self) -> String {
        self.to_string().dimmed().to_string()
    }

    fn success(&self) -> String {
        self.to_string().green().to_string()
    }

    fn warn(&self) -> String {
        self.to_string().yellow().to_string()
    }

    fn error(&self) -> String {
        self.to_string().red().bold().to_string()
    }
}

/// Green check mark
pub fn check() -> String {
    CHECK.success()
}

/// Red cross
pub fn cross() -> String {
    CROSS.error()
}

/// Dimmed arrow for list items
pub fn arrow() -> String {
    "→".muted()
}

/// Spinner style shared by long-running steps
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("  {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "])
}
