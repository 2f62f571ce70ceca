//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for datcure using the `clap` crate.
//! Each subcommand opens a directory, waits for the scan, and drives one
//! session operation: listing, filtering, bulk tag edits, relocation, caption
//! sorting or a tag-frequency export.
//!
//! # Commands
//!
//! - **scan**: list images with their captions
//! - **tags**: list every tag in use with its image count
//! - **filter** / **ignore**: show images by tag membership
//! - **tag** / **untag**: bulk caption edits over all or filtered images
//! - **cp** / **mv**: relocate image+caption pairs with collision renaming
//! - **sort**: persist a frequency-sorted caption order for one image
//! - **stats**: export the tag frequency table (text, CSV or JSON)
//!
//! A global `--quiet` flag strips informational output for scripting, and
//! `mv` asks for confirmation unless `--yes` is given.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::filter::FilterMode;
use crate::tags::SortDirection;

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
    name = "datcure",
    version,
    about = "Curate image datasets: tag captions, filtering, and collision-safe relocation"
)]
pub struct Cli {
    /// Suppress informational output (only results are printed)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// How multiple chosen tags combine during filtering
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterModeArg {
    /// Keep images carrying any chosen tag
    #[default]
    Inclusive,
    /// Keep images carrying all chosen tags
    Exclusive,
}

impl From<FilterModeArg> for FilterMode {
    fn from(mode: FilterModeArg) -> Self {
        match mode {
            FilterModeArg::Inclusive => Self::Inclusive,
            FilterModeArg::Exclusive => Self::Exclusive,
        }
    }
}

/// Output format for the stats export
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsFormat {
    /// Human-readable rows
    #[default]
    Text,
    /// CSV with a `tag,count` header
    Csv,
    /// Pretty-printed JSON array
    Json,
}

/// Caption sort order for the `sort` command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrderArg {
    /// Rarest tags first
    #[default]
    Ascending,
    /// Most frequent tags first
    Descending,
}

impl From<SortOrderArg> for SortDirection {
    fn from(order: SortOrderArg) -> Self {
        match order {
            SortOrderArg::Ascending => Self::Ascending,
            SortOrderArg::Descending => Self::Descending,
        }
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the images of a directory with their captions
    #[command(alias = "s")]
    Scan {
        /// Directory to open
        dir: PathBuf,

        /// Only consider the top level, not subdirectories
        #[arg(long)]
        no_subdirs: bool,
    },

    /// List every tag in use with its image count
    #[command(alias = "t")]
    Tags {
        /// Directory to open
        dir: PathBuf,

        /// Only consider the top level, not subdirectories
        #[arg(long)]
        no_subdirs: bool,
    },

    /// Show the images matching the chosen tags
    #[command(alias = "f")]
    Filter {
        /// Directory to open
        dir: PathBuf,

        /// Tag to filter by (repeatable)
        #[arg(short, long = "tag", required = true)]
        tags: Vec<String>,

        /// How multiple tags combine
        #[arg(long, value_enum, default_value_t)]
        mode: FilterModeArg,

        /// Only consider the top level, not subdirectories
        #[arg(long)]
        no_subdirs: bool,
    },

    /// Show the images carrying none of the chosen tags
    #[command(alias = "i")]
    Ignore {
        /// Directory to open
        dir: PathBuf,

        /// Tag to ignore (repeatable)
        #[arg(short, long = "tag", required = true)]
        tags: Vec<String>,

        /// Only consider the top level, not subdirectories
        #[arg(long)]
        no_subdirs: bool,
    },

    /// Add a tag to all images, or to those matching a filter
    Tag {
        /// Directory to open
        dir: PathBuf,

        /// Tag to add
        tag: String,

        /// Restrict to images matching these tags first (repeatable)
        #[arg(short = 'f', long = "filter")]
        filter_tags: Vec<String>,

        /// How multiple filter tags combine
        #[arg(long, value_enum, default_value_t)]
        mode: FilterModeArg,

        /// Only consider the top level, not subdirectories
        #[arg(long)]
        no_subdirs: bool,
    },

    /// Remove a tag from all images, or from those matching a filter
    Untag {
        /// Directory to open
        dir: PathBuf,

        /// Tag to remove
        tag: String,

        /// Restrict to images matching these tags first (repeatable)
        #[arg(short = 'f', long = "filter")]
        filter_tags: Vec<String>,

        /// How multiple filter tags combine
        #[arg(long, value_enum, default_value_t)]
        mode: FilterModeArg,

        /// Only consider the top level, not subdirectories
        #[arg(long)]
        no_subdirs: bool,
    },

    /// Copy images and their captions into another directory
    Cp {
        /// Directory to open
        dir: PathBuf,

        /// Destination directory
        dest: PathBuf,

        /// Restrict to images matching these tags first (repeatable)
        #[arg(short = 'f', long = "filter")]
        filter_tags: Vec<String>,

        /// How multiple filter tags combine
        #[arg(long, value_enum, default_value_t)]
        mode: FilterModeArg,

        /// Only consider the top level, not subdirectories
        #[arg(long)]
        no_subdirs: bool,
    },

    /// Move images and their captions into another directory
    Mv {
        /// Directory to open
        dir: PathBuf,

        /// Destination directory
        dest: PathBuf,

        /// Restrict to images matching these tags first (repeatable)
        #[arg(short = 'f', long = "filter")]
        filter_tags: Vec<String>,

        /// How multiple filter tags combine
        #[arg(long, value_enum, default_value_t)]
        mode: FilterModeArg,

        /// Only consider the top level, not subdirectories
        #[arg(long)]
        no_subdirs: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Sort one image's caption by tag frequency and save it
    Sort {
        /// Directory to open
        dir: PathBuf,

        /// Image whose caption to sort (absolute, or relative to DIR)
        image: PathBuf,

        /// Sort order
        #[arg(long, value_enum, default_value_t)]
        order: SortOrderArg,

        /// Only consider the top level, not subdirectories
        #[arg(long)]
        no_subdirs: bool,
    },

    /// Export the tag frequency table
    Stats {
        /// Directory to open
        dir: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: StatsFormat,

        /// Only consider the top level, not subdirectories
        #[arg(long)]
        no_subdirs: bool,
    },
}
