//! Copy and move of image+caption pairs
//!
//! Each image travels with its caption file. The destination name is the
//! source base name, with `_<n>` (n starting at 1) appended before the
//! extension until it no longer collides with an existing file; the caption
//! takes the image's resolved base name plus `.txt` and is never resolved on
//! its own, so `cat_1.png` always sits next to `cat_1.txt`.
//!
//! Failures are isolated per image: one image failing to transfer does not
//! stop the batch, it becomes a line in the report. A caption that fails to
//! follow its image demotes to a warning, the image itself still counts as
//! transferred. Moving falls back to copy-then-delete when a plain rename
//! crosses filesystems.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::captions;

/// Which transfer the service performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    /// Duplicate at the destination, source stays
    Copy,
    /// Relocate to the destination, source is removed on success
    Move,
}

impl TransferKind {
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Move => "move",
        }
    }

    #[must_use]
    pub const fn past_tense(self) -> &'static str {
        match self {
            Self::Copy => "copied",
            Self::Move => "moved",
        }
    }
}

/// One successfully transferred image
#[derive(Debug, Clone, Serialize)]
pub struct Relocated {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Destination of the caption file, if the image had one that followed
    pub caption: Option<PathBuf>,
}

/// One image that could not be transferred
#[derive(Debug, Clone, Serialize)]
pub struct RelocationFailure {
    pub source: PathBuf,
    pub reason: String,
}

/// Aggregated outcome of one copy/move batch
#[derive(Debug, Default, Serialize)]
pub struct RelocationReport {
    pub relocated: Vec<Relocated>,
    pub failures: Vec<RelocationFailure>,
    /// Caption transfer problems for images that themselves succeeded
    pub warnings: Vec<String>,
}

impl RelocationReport {
    /// Whether every image transferred without failure
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Paths of the successfully transferred sources
    #[must_use]
    pub fn sources_done(&self) -> Vec<&Path> {
        self.relocated.iter().map(|r| r.source.as_path()).collect()
    }
}

/// Pick a collision-free destination path for `source` inside `dest_dir`
///
/// The probe restarts at 1 for every image; the first free candidate wins.
#[must_use]
pub fn resolve_destination(dest_dir: &Path, source: &Path) -> PathBuf {
    let file_name = source.file_name().unwrap_or(source.as_os_str());
    let candidate = dest_dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let stem = source
        .file_stem()
        .map_or_else(String::new, |s| s.to_string_lossy().into_owned());
    let extension = source.extension().map(|e| e.to_string_lossy().into_owned());

    let mut n = 1;
    loop {
        let name = match &extension {
            Some(ext) => format!("{stem}_{n}.{ext}"),
            None => format!("{stem}_{n}"),
        };
        let candidate = dest_dir.join(name);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

fn transfer_file(source: &Path, destination: &Path, kind: TransferKind) -> io::Result<()> {
    match kind {
        TransferKind::Copy => fs::copy(source, destination).map(|_| ()),
        TransferKind::Move => fs::rename(source, destination).or_else(|_| {
            // Rename fails across filesystems; degrade to copy + delete.
            fs::copy(source, destination)?;
            fs::remove_file(source)
        }),
    }
}

/// Transfer a batch of images (and their captions) into `dest_dir`
///
/// Processes every image regardless of earlier failures and reports each
/// outcome individually. The caller owns any catalog/index bookkeeping for
/// moved images.
#[must_use]
pub fn transfer(images: &[PathBuf], dest_dir: &Path, kind: TransferKind) -> RelocationReport {
    let mut report = RelocationReport::default();

    for image in images {
        let destination = resolve_destination(dest_dir, image);
        if let Err(e) = transfer_file(image, &destination, kind) {
            report.failures.push(RelocationFailure {
                source: image.clone(),
                reason: e.to_string(),
            });
            continue;
        }

        let caption_src = captions::caption_path(image);
        let mut caption_dest = None;
        if caption_src.exists() {
            let target = destination.with_extension("txt");
            match transfer_file(&caption_src, &target, kind) {
                Ok(()) => caption_dest = Some(target),
                Err(e) => report.warnings.push(format!(
                    "failed to {} caption {}: {e}",
                    kind.verb(),
                    caption_src.display()
                )),
            }
        }

        report.relocated.push(Relocated {
            source: image.clone(),
            destination,
            caption: caption_dest,
        });
    }

    report
}
