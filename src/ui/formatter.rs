//! Pure formatting functions for terminal output.
//!
//! Styling goes through `console`, which drops colour codes when the stream
//! is not a terminal.

use console::style;

use crate::manifest::VersionChange;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a bold section heading preceded by a blank line.
pub fn display_section(title: &str) {
    println!("\n{}", style(title).bold());
}

/// Announce whether this run writes files.
pub fn display_mode(execute: bool) {
    if execute {
        println!("{}\n", style("Executing").bold().red());
    } else {
        println!("{}\n", style("Starting dry run").bold().cyan());
    }
}

/// Render a manifest change as `<path>: updated '<old line>' -> '<version>'`.
pub fn format_version_change(change: &VersionChange) -> String {
    format!(
        "{}: updated '{}' -> '{}'",
        change.path.display(),
        change.old_line.trim(),
        change.new_version
    )
}

pub fn display_version_change(change: &VersionChange) {
    println!("{}", format_version_change(change));
}

/// Print the full rewritten changelog for review.
pub fn display_changelog(text: &str) {
    println!("{}", text);
}
