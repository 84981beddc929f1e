//! TTY-aware color and styling helpers for human-friendly CLI output.
//!
//! Built on the [`console`] crate which automatically detects whether
//! stdout/stderr is a terminal and respects the `NO_COLOR` environment
//! variable (<https://no-color.org/>).

use console::{Emoji, Style};

fn out() -> Style {
    Style::new()
}

fn err() -> Style {
    Style::new().for_stderr()
}

/// Bold text.
pub fn bold(text: &str) -> String {
    out().bold().apply_to(text).to_string()
}

/// Dim / muted text (for secondary information).
pub fn dim(text: &str) -> String {
    out().dim().apply_to(text).to_string()
}

/// Bold green – emphasized success.
pub fn green_bold(text: &str) -> String {
    out().green().bold().apply_to(text).to_string()
}

/// Yellow – warning, pending change.
pub fn yellow(text: &str) -> String {
    out().yellow().apply_to(text).to_string()
}

/// Bold yellow.
pub fn yellow_bold(text: &str) -> String {
    out().yellow().bold().apply_to(text).to_string()
}

/// Cyan (paths, labels).
pub fn cyan(text: &str) -> String {
    out().cyan().apply_to(text).to_string()
}

// Stderr variants

/// Bold red on stderr.
pub fn err_red_bold(text: &str) -> String {
    err().red().bold().apply_to(text).to_string()
}

/// Dim on stderr.
pub fn err_dim(text: &str) -> String {
    err().dim().apply_to(text).to_string()
}

/// Bold cyan on stderr (hints).
pub fn err_cyan_bold(text: &str) -> String {
    err().cyan().bold().apply_to(text).to_string()
}

static BULLET: Emoji<'_, '_> = Emoji("• ", "- ");

/// List bullet, with an ASCII fallback for terminals without Unicode.
pub fn bullet() -> String {
    BULLET.to_string()
}

/// The title block printed at the start of every run.
pub fn banner() -> String {
    let title = "Claude Code Settings Permission Format Fixer";
    format!("{}\n{}", out().cyan().bold().apply_to(title), "=".repeat(50))
}
