//! Caption file storage
//!
//! Every image may carry a sidecar caption file: same base name, `.txt`
//! extension, containing the image's tags as a comma-separated list.
//! This module owns that on-disk format.
//!
//! Reads are best-effort: a missing file is an empty caption, bytes that are
//! not valid UTF-8 are decoded lossily, and irregular whitespace around tags
//! is trimmed away. Writes always produce the canonical `", "`-joined form,
//! so a caption with messy spacing is normalized on its next save.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Caption file error type
pub type Result<T> = std::result::Result<T, CaptionError>;

/// Errors raised by caption file I/O
#[derive(Debug, Error)]
pub enum CaptionError {
    #[error("failed to read caption {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write caption {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Path of the caption file belonging to an image
///
/// `photos/cat.png` maps to `photos/cat.txt`.
#[must_use]
pub fn caption_path(image: &Path) -> PathBuf {
    image.with_extension("txt")
}

/// Parse caption text into an ordered tag list
///
/// Splits on commas, trims whitespace from each token, drops empty tokens
/// and keeps the first occurrence of a tag that appears twice. Order is
/// otherwise preserved.
#[must_use]
pub fn parse_tags(text: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for token in text.split(',') {
        let tag = token.trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Canonical serialized form of a tag list
#[must_use]
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Read the tags for an image from its sidecar caption file
///
/// A missing caption file yields an empty tag list. Invalid UTF-8 is
/// recovered lossily rather than failing the read.
///
/// # Errors
/// Returns `CaptionError::Read` for I/O failures other than the file
/// not existing.
pub fn read(image: &Path) -> Result<Vec<String>> {
    let path = caption_path(image);
    match fs::read(&path) {
        Ok(bytes) => Ok(parse_tags(&String::from_utf8_lossy(&bytes))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(source) => Err(CaptionError::Read { path, source }),
    }
}

/// Overwrite an image's caption file with the canonical joined form
///
/// Callers treat a failed write as non-fatal: the in-memory tag list stays
/// the source of truth until the next successful write or reload.
///
/// # Errors
/// Returns `CaptionError::Write` if the file cannot be written.
pub fn write(image: &Path, tags: &[String]) -> Result<()> {
    let path = caption_path(image);
    fs::write(&path, join_tags(tags)).map_err(|source| CaptionError::Write { path, source })
}
