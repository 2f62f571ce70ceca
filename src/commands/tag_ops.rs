//! Bulk caption edits and caption sorting

use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::DatcureError;
use crate::cli::{FilterModeArg, SortOrderArg};
use crate::session::TagEditReport;

use super::{open_session, select_targets};

type Result<T> = std::result::Result<T, DatcureError>;

/// Add or remove one tag across all images, or those matching a filter
///
/// Each image that already satisfies the edit is skipped without touching
/// the frequency index; per-image caption write failures become warnings.
///
/// # Errors
/// Returns the scan error if the directory cannot be read, and
/// `SessionError::EmptyTag` (via the session) for a blank tag.
#[allow(clippy::fn_params_excessive_bools)]
pub fn execute_tag_edit(
    dir: &Path,
    tag: &str,
    filter_tags: &[String],
    mode: FilterModeArg,
    add: bool,
    include_subdirs: bool,
    quiet: bool,
) -> Result<()> {
    let mut session = open_session(dir, include_subdirs, quiet)?;
    let selected = select_targets(&mut session, filter_tags, mode);
    if selected == 0 {
        if !quiet {
            println!("No images match the specified criteria.");
        }
        return Ok(());
    }

    let report = if add {
        session.add_tag_to_selection(tag)?
    } else {
        session.remove_tag_from_selection(tag)?
    };
    let verb = if add { "Tagged" } else { "Untagged" };
    print_tag_edit_report(&report, verb, selected, quiet);
    Ok(())
}

fn print_tag_edit_report(report: &TagEditReport, verb: &str, selected: usize, quiet: bool) {
    if !quiet {
        for image in &report.changed {
            println!("✓ {verb}: {}", image.display());
        }
    }
    for warning in &report.warnings {
        eprintln!("⚠ {warning}");
    }
    if !quiet {
        let skipped = selected - report.changed.len();
        println!("\n{}", format!("=== {verb} Summary ===").bold());
        println!("  {} {}", "✓ Changed:".green(), report.changed.len());
        if skipped > 0 {
            println!("  {} {skipped}", "⊘ Unchanged:".yellow());
        }
        if !report.warnings.is_empty() {
            println!("  {} {}", "⚠ Warnings:".yellow(), report.warnings.len());
        }
    }
}

/// Sort one image's caption by global tag frequency and persist the order
///
/// # Errors
/// Returns the scan error if the directory cannot be read, and
/// `SessionError::UnknownImage` if the image is not part of the catalog.
pub fn execute_sort(
    dir: &Path,
    image: &Path,
    order: SortOrderArg,
    include_subdirs: bool,
    quiet: bool,
) -> Result<()> {
    let mut session = open_session(dir, include_subdirs, quiet)?;

    // Accept catalog paths given relative to the opened directory.
    let target: PathBuf = if session.catalog().contains(image) {
        image.to_path_buf()
    } else {
        dir.join(image)
    };

    let sorted = session.sort_tags_for_image(&target, order.into())?;
    if let Some(warning) = &sorted.warning {
        eprintln!("⚠ {warning}");
    }
    if quiet {
        println!("{}", sorted.tags.join(", "));
    } else {
        println!("{}: {}", target.display(), sorted.tags.join(", "));
    }
    Ok(())
}
