//! Datcure CLI application entry point
//!
//! This is the main executable for the datcure image dataset curator. It
//! opens a directory of images with sidecar caption files and drives the
//! curation session from the command line.
//!
//! # Usage
//!
//! ```bash
//! # List images and their captions
//! datcure scan ./dataset
//!
//! # List every tag with its usage count
//! datcure tags ./dataset
//!
//! # Show images carrying either tag
//! datcure filter ./dataset -t cat -t dog
//!
//! # Show images carrying both tags
//! datcure filter ./dataset -t cat -t grey --mode exclusive
//!
//! # Add a tag to every image matching a filter
//! datcure tag ./dataset fluffy -f cat
//!
//! # Move matching images (and captions) elsewhere, collision-safe
//! datcure mv ./dataset ./rejects -f blurry --yes
//!
//! # Export the tag frequency table
//! datcure stats ./dataset --format csv
//! ```
//!
//! # Quiet mode
//!
//! `--quiet` reduces output to bare values so results can be piped into
//! other tools.

use colored::Colorize;

use datcure::DatcureError;
use datcure::cli::{Cli, Commands};
use datcure::commands;
use datcure::relocate::TransferKind;

type Result<T> = std::result::Result<T, DatcureError>;

fn main() {
    let cli = Cli::parse_args();
    let quiet = cli.quiet;
    if let Err(e) = run(cli, quiet) {
        eprintln!("{}", format!("Error: {e}").red());
        std::process::exit(1);
    }
}

fn run(cli: Cli, quiet: bool) -> Result<()> {
    match cli.command {
        Commands::Scan { dir, no_subdirs } => commands::execute_scan(&dir, !no_subdirs, quiet),

        Commands::Tags { dir, no_subdirs } => commands::execute_tags(&dir, !no_subdirs, quiet),

        Commands::Filter {
            dir,
            tags,
            mode,
            no_subdirs,
        } => commands::execute_filter(&dir, &tags, mode, false, !no_subdirs, quiet),

        Commands::Ignore {
            dir,
            tags,
            no_subdirs,
        } => commands::execute_filter(
            &dir,
            &tags,
            datcure::cli::FilterModeArg::Inclusive,
            true,
            !no_subdirs,
            quiet,
        ),

        Commands::Tag {
            dir,
            tag,
            filter_tags,
            mode,
            no_subdirs,
        } => commands::execute_tag_edit(&dir, &tag, &filter_tags, mode, true, !no_subdirs, quiet),

        Commands::Untag {
            dir,
            tag,
            filter_tags,
            mode,
            no_subdirs,
        } => commands::execute_tag_edit(&dir, &tag, &filter_tags, mode, false, !no_subdirs, quiet),

        Commands::Cp {
            dir,
            dest,
            filter_tags,
            mode,
            no_subdirs,
        } => commands::execute_transfer(
            &dir,
            &dest,
            TransferKind::Copy,
            &filter_tags,
            mode,
            !no_subdirs,
            true,
            quiet,
        ),

        Commands::Mv {
            dir,
            dest,
            filter_tags,
            mode,
            no_subdirs,
            yes,
        } => commands::execute_transfer(
            &dir,
            &dest,
            TransferKind::Move,
            &filter_tags,
            mode,
            !no_subdirs,
            yes,
            quiet,
        ),

        Commands::Sort {
            dir,
            image,
            order,
            no_subdirs,
        } => commands::execute_sort(&dir, &image, order, !no_subdirs, quiet),

        Commands::Stats {
            dir,
            format,
            no_subdirs,
        } => commands::execute_stats(&dir, format, !no_subdirs, quiet),
    }
}
