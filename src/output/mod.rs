//! Output formatting for CLI display
//!
//! Formatting helpers shared by the commands: image lines with their tags,
//! tag rows with usage counts, and colored transfer outcomes. Quiet mode
//! strips decoration down to the bare values for scripting.

use std::path::Path;

use colored::Colorize;

use crate::relocate::RelocationReport;

/// Format an image with its caption tags for display
#[must_use]
pub fn image_with_tags(path: &Path, tags: &[String], quiet: bool) -> String {
    if quiet {
        path.display().to_string()
    } else if tags.is_empty() {
        format!("  {} (no tags)", path.display())
    } else {
        format!("  {} [{}]", path.display(), tags.join(", "))
    }
}

/// Format a tag with its usage count
#[must_use]
pub fn tag_with_count(tag: &str, count: usize, quiet: bool) -> String {
    if quiet {
        tag.to_string()
    } else {
        format!("  {tag} (used by {count} image(s))")
    }
}

/// Color a path based on file existence (green if present, red if missing)
#[must_use]
pub fn colorize_path(path: &Path) -> String {
    let formatted = path.display().to_string();
    if path.exists() {
        formatted.green().to_string()
    } else {
        formatted.red().to_string()
    }
}

/// Print a per-item transfer report followed by a summary block
pub fn print_relocation_report(report: &RelocationReport, operation: &str, quiet: bool) {
    for item in &report.relocated {
        if !quiet {
            println!(
                "✓ {}: {} → {}",
                operation,
                item.source.display(),
                item.destination.display()
            );
        }
    }
    for failure in &report.failures {
        eprintln!(
            "✗ Failed to {} {}: {}",
            operation.to_lowercase(),
            failure.source.display(),
            failure.reason
        );
    }
    for warning in &report.warnings {
        eprintln!("⚠ {warning}");
    }

    if !quiet {
        println!("\n{}", format!("=== {operation} Summary ===").bold());
        println!("  {} {}", "✓ Success:".green(), report.relocated.len());
        if !report.failures.is_empty() {
            println!("  {} {}", "✗ Errors:".red(), report.failures.len());
        }
        if !report.warnings.is_empty() {
            println!("  {} {}", "⚠ Warnings:".yellow(), report.warnings.len());
        }
    }
}
