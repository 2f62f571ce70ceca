//! Copy and move commands

use std::path::Path;

use dialoguer::Confirm;

use crate::DatcureError;
use crate::cli::FilterModeArg;
use crate::output;
use crate::relocate::TransferKind;

use super::{open_session, select_targets};

type Result<T> = std::result::Result<T, DatcureError>;

/// Copy or move the working set (and captions) into `dest`
///
/// The working set is the whole catalog, or the filtered view when filter
/// tags are given. Moving prompts for confirmation unless `yes` is set.
///
/// # Errors
/// Returns the scan error if the directory cannot be read, and the session's
/// validation errors for a blank destination.
#[allow(clippy::fn_params_excessive_bools)]
pub fn execute_transfer(
    dir: &Path,
    dest: &Path,
    kind: TransferKind,
    filter_tags: &[String],
    mode: FilterModeArg,
    include_subdirs: bool,
    yes: bool,
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

    if kind == TransferKind::Move && !yes {
        let prompt = format!(
            "Move {selected} image(s) and their captions to '{}'?",
            dest.display()
        );
        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .interact()
            .map_err(|e| DatcureError::InvalidInput(format!("Failed to get confirmation: {e}")))?;
        if !confirmed {
            println!("Operation cancelled.");
            return Ok(());
        }
    }

    let report = match kind {
        TransferKind::Copy => session.copy_selection(dest)?,
        TransferKind::Move => session.move_selection(dest)?,
    };

    let operation = match kind {
        TransferKind::Copy => "Copy",
        TransferKind::Move => "Move",
    };
    output::print_relocation_report(&report, operation, quiet);
    Ok(())
}
