//! Datcure - an image dataset curator
//!
//! This library maintains a consistent mapping between images, their
//! comma-separated tag captions, and a derived global tag-frequency index.
//! Captions live in sidecar `.txt` files next to each image; the index is
//! kept incrementally consistent under every mutation.
//!
//! The core types are assembled by [`session::Session`], which owns the
//! catalog, tag index, selection and filter state for one opened directory
//! and exposes the operations a frontend drives: loading, filtering,
//! selection, bulk tag edits and collision-safe copy/move of image+caption
//! pairs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod captions;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod filter;
pub mod output;
pub mod relocate;
pub mod selection;
pub mod session;
pub mod tags;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum DatcureError {
    /// Caption file error
    #[error("Caption error: {0}")]
    CaptionError(#[from] captions::CaptionError),
    /// Directory scan error
    #[error("Scan error: {0}")]
    ScanError(#[from] catalog::loader::ScanError),
    /// Session error
    #[error("Session error: {0}")]
    SessionError(#[from] session::SessionError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// CSV serialization error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Data struct pairing one image with its ordered caption tags
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ImageEntry {
    pub path: PathBuf,
    pub tags: Vec<String>,
}

impl ImageEntry {
    /// Create a new ImageEntry
    #[must_use]
    pub const fn new(path: PathBuf, tags: Vec<String>) -> Self {
        Self { path, tags }
    }
}
