//! Command implementations for the datcure CLI
//!
//! Every command follows the same shape: open the directory into a
//! [`Session`] (waiting for the background scan), optionally narrow the
//! working set with a tag filter, then run one session operation and print
//! its per-item results. Failures inside a batch never abort the batch; they
//! are reported per item and rolled up into the summary.

use std::io::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::DatcureError;
use crate::cli::{FilterModeArg, StatsFormat};
use crate::output;
use crate::session::{LoadApplied, Session};

pub mod tag_ops;
pub mod transfer;

pub use tag_ops::{execute_sort, execute_tag_edit};
pub use transfer::execute_transfer;

type Result<T> = std::result::Result<T, DatcureError>;

/// Open `dir` into a fresh session, blocking until the scan is applied
///
/// Scan warnings (unreadable captions) go to stderr regardless of quiet
/// mode; the loaded-count line is informational and suppressed by it.
///
/// # Errors
/// Returns the scan error if the directory cannot be read.
pub fn open_session(dir: &Path, include_subdirs: bool, quiet: bool) -> Result<Session> {
    let mut session = Session::new();
    session.request_load(dir, include_subdirs);
    match session.wait_load() {
        Some(LoadApplied::Applied { images, warnings }) => {
            for warning in &warnings {
                eprintln!("⚠ {warning}");
            }
            if !quiet {
                println!("Loaded {images} image(s) from {}", dir.display());
            }
            Ok(session)
        }
        Some(LoadApplied::Failed(e)) => Err(e.into()),
        Some(LoadApplied::Stale) | None => Err(DatcureError::InvalidInput(
            "directory load did not complete".into(),
        )),
    }
}

/// Narrow the session to a filtered view and select everything in it
///
/// With no filter tags the whole catalog is selected. Returns the number of
/// selected images.
pub fn select_targets(session: &mut Session, filter_tags: &[String], mode: FilterModeArg) -> usize {
    session.set_filter_mode(mode.into());
    if !filter_tags.is_empty() {
        session.filter_images(filter_tags);
    }
    session.select_all();
    session.selected_count()
}

/// List images with their captions
///
/// # Errors
/// Returns the scan error if the directory cannot be read.
pub fn execute_scan(dir: &Path, include_subdirs: bool, quiet: bool) -> Result<()> {
    let session = open_session(dir, include_subdirs, quiet)?;
    for (image, tags) in session.catalog().entries() {
        println!("{}", output::image_with_tags(image, tags, quiet));
    }
    Ok(())
}

/// List every tag in use with its image count
///
/// # Errors
/// Returns the scan error if the directory cannot be read.
pub fn execute_tags(dir: &Path, include_subdirs: bool, quiet: bool) -> Result<()> {
    let session = open_session(dir, include_subdirs, quiet)?;
    let summary = session.tag_summary();
    if summary.is_empty() {
        if !quiet {
            println!("No tags found.");
        }
        return Ok(());
    }
    for (tag, count) in &summary {
        println!("{}", output::tag_with_count(tag, *count, quiet));
    }
    Ok(())
}

/// Show the images matching (or, with `ignore`, avoiding) the chosen tags
///
/// # Errors
/// Returns the scan error if the directory cannot be read.
pub fn execute_filter(
    dir: &Path,
    tags: &[String],
    mode: FilterModeArg,
    ignore: bool,
    include_subdirs: bool,
    quiet: bool,
) -> Result<()> {
    let mut session = open_session(dir, include_subdirs, quiet)?;
    session.set_filter_mode(mode.into());
    if ignore {
        session.ignore_tags(tags);
    } else {
        session.filter_images(tags);
    }

    let view = session.active_view().to_vec();
    if view.is_empty() {
        if !quiet {
            println!("No images match the chosen tags.");
        }
        return Ok(());
    }
    for image in &view {
        let caption = session.catalog().tags(image).unwrap_or(&[]);
        println!("{}", output::image_with_tags(image, caption, quiet));
    }
    if !quiet {
        println!("{} image(s) in view", view.len());
    }
    Ok(())
}

#[derive(Serialize)]
struct TagRow<'a> {
    tag: &'a str,
    count: usize,
}

/// Export the tag frequency table as text, CSV or JSON
///
/// # Errors
/// Returns the scan error if the directory cannot be read, or a
/// serialization error from the chosen format.
pub fn execute_stats(
    dir: &Path,
    format: StatsFormat,
    include_subdirs: bool,
    quiet: bool,
) -> Result<()> {
    let session = open_session(dir, include_subdirs, quiet)?;
    let summary = session.tag_summary();
    let rows: Vec<TagRow> = summary
        .iter()
        .map(|(tag, count)| TagRow {
            tag: tag.as_str(),
            count: *count,
        })
        .collect();

    match format {
        StatsFormat::Text => {
            for row in &rows {
                println!("{}", output::tag_with_count(row.tag, row.count, quiet));
            }
        }
        StatsFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for row in &rows {
                writer.serialize(row)?;
            }
            writer.flush().map_err(DatcureError::IoError)?;
        }
        StatsFormat::Json => {
            let json = serde_json::to_string_pretty(&rows)?;
            let mut stdout = std::io::stdout();
            writeln!(stdout, "{json}").map_err(DatcureError::IoError)?;
        }
    }
    Ok(())
}
