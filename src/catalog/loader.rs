//! Directory ingestion
//!
//! Scanning a directory walks it (recursively or not), keeps the files whose
//! extension is one of the recognized raster formats and reads each image's
//! caption alongside. Traversal order is lexicographic per directory level,
//! so two scans of the same tree produce the same catalog. Subtrees the
//! process cannot read are skipped silently and a caption that fails to read
//! becomes an empty tag list plus a warning, never a failed scan.
//!
//! Because a scan touches an unbounded amount of filesystem, it runs on a
//! worker thread. [`Loader`] hands each scan a generation number and ships
//! the finished [`LoadOutcome`] back over a channel; the owning thread
//! applies an outcome only if its generation is still the latest one issued,
//! which makes superseded loads harmless (last load wins, no partial merge).

use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::{Receiver, Sender, unbounded};
use rayon::prelude::*;
use thiserror::Error;
use walkdir::WalkDir;

use crate::ImageEntry;
use crate::captions;

/// File extensions recognized as images, matched case-insensitively
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Scan error type
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors raised when a scan cannot start at all
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Whether a path names a file the catalog should ingest
#[must_use]
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Result of one finished directory scan
#[derive(Debug)]
pub struct LoadedCatalog {
    /// Directory the scan started from
    pub root: PathBuf,
    /// Discovered images with their captions, in scan order
    pub entries: Vec<ImageEntry>,
    /// Per-file caption problems encountered along the way
    pub warnings: Vec<String>,
}

/// Walk `root` and collect every image with its caption
///
/// With `include_subdirs` false only the top level of `root` is considered.
/// Caption files are read in parallel once the walk has fixed the order.
///
/// # Errors
/// Returns `ScanError::NotADirectory` if `root` does not name a directory.
pub fn scan_directory(root: &Path, include_subdirs: bool) -> Result<LoadedCatalog> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut walker = WalkDir::new(root).sort_by_file_name();
    if !include_subdirs {
        walker = walker.max_depth(1);
    }

    // Unreadable entries (permissions, races with deletion) drop out here.
    let images: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| is_image_file(path))
        .collect();

    let scanned: Vec<(ImageEntry, Option<String>)> = images
        .into_par_iter()
        .map(|path| match captions::read(&path) {
            Ok(tags) => (ImageEntry::new(path, tags), None),
            Err(e) => (ImageEntry::new(path, Vec::new()), Some(e.to_string())),
        })
        .collect();

    let mut entries = Vec::with_capacity(scanned.len());
    let mut warnings = Vec::new();
    for (entry, warning) in scanned {
        if let Some(warning) = warning {
            warnings.push(warning);
        }
        entries.push(entry);
    }

    Ok(LoadedCatalog {
        root: root.to_path_buf(),
        entries,
        warnings,
    })
}

/// A finished scan tagged with the generation that requested it
#[derive(Debug)]
pub struct LoadOutcome {
    generation: u64,
    /// The scan result itself
    pub result: Result<LoadedCatalog>,
}

impl LoadOutcome {
    /// Generation of the request that produced this outcome
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Background scan dispatcher with last-load-wins supersession
///
/// Each `begin` spawns a worker computing a pure [`LoadedCatalog`] and bumps
/// the generation counter; outcomes of earlier generations are recognizably
/// stale by the time they arrive.
#[derive(Debug)]
pub struct Loader {
    latest: u64,
    tx: Sender<LoadOutcome>,
    rx: Receiver<LoadOutcome>,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { latest: 0, tx, rx }
    }

    /// Start a scan on a worker thread, returning its generation
    pub fn begin(&mut self, root: PathBuf, include_subdirs: bool) -> u64 {
        self.latest += 1;
        let generation = self.latest;
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = scan_directory(&root, include_subdirs);
            // The receiver may be gone during shutdown; nothing to do then.
            let _ = tx.send(LoadOutcome { generation, result });
        });
        generation
    }

    /// Whether `generation` is still the latest one issued
    #[must_use]
    pub const fn is_current(&self, generation: u64) -> bool {
        generation == self.latest
    }

    /// Latest generation issued so far (zero before the first `begin`)
    #[must_use]
    pub const fn latest_generation(&self) -> u64 {
        self.latest
    }

    /// Take the next finished outcome if one is waiting
    #[must_use]
    pub fn try_recv(&self) -> Option<LoadOutcome> {
        self.rx.try_recv().ok()
    }

    /// Block until the next finished outcome arrives
    ///
    /// Only meaningful while at least one scan is in flight.
    #[must_use]
    pub fn recv(&self) -> Option<LoadOutcome> {
        self.rx.recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::GalleryFixture;

    #[test]
    fn test_is_image_file_matches_known_extensions() {
        assert!(is_image_file(Path::new("a.png")));
        assert!(is_image_file(Path::new("b.JPeG")));
        assert!(is_image_file(Path::new("c.GIF")));
        assert!(!is_image_file(Path::new("notes.txt")));
        assert!(!is_image_file(Path::new("archive.png.zip")));
        assert!(!is_image_file(Path::new("no_extension")));
    }

    #[test]
    fn test_scan_collects_images_and_captions() {
        let gallery = GalleryFixture::new();
        gallery.add_captioned_image("a.jpg", &["x", "y"]);
        gallery.add_image("b.jpg");
        gallery.write_caption_raw("readme.txt", "not a caption of any image");

        let loaded = scan_directory(gallery.root(), true).unwrap();
        assert_eq!(loaded.entries.len(), 2);
        assert_eq!(loaded.entries[0].tags, vec!["x", "y"]);
        assert!(loaded.entries[1].tags.is_empty());
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn test_scan_order_is_lexicographic() {
        let gallery = GalleryFixture::new();
        gallery.add_image("c.png");
        gallery.add_image("a.png");
        gallery.add_image("b.png");

        let loaded = scan_directory(gallery.root(), true).unwrap();
        let names: Vec<_> = loaded
            .entries
            .iter()
            .map(|e| e.path.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_scan_without_subdirs_stays_at_top_level() {
        let gallery = GalleryFixture::new();
        gallery.add_image("top.png");
        gallery.add_image_in("nested", "deep.png");

        let flat = scan_directory(gallery.root(), false).unwrap();
        assert_eq!(flat.entries.len(), 1);

        let recursive = scan_directory(gallery.root(), true).unwrap();
        assert_eq!(recursive.entries.len(), 2);
    }

    #[test]
    fn test_scan_rejects_non_directory() {
        let gallery = GalleryFixture::new();
        let file = gallery.add_image("a.png");

        assert!(matches!(
            scan_directory(&file, true),
            Err(ScanError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_loader_generations_increase() {
        let gallery = GalleryFixture::new();
        gallery.add_image("a.png");

        let mut loader = Loader::new();
        let first = loader.begin(gallery.root().to_path_buf(), true);
        let second = loader.begin(gallery.root().to_path_buf(), true);

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert!(!loader.is_current(first));
        assert!(loader.is_current(second));

        // Both workers eventually report; only the second is current.
        let mut seen = Vec::new();
        for _ in 0..2 {
            seen.push(loader.recv().unwrap().generation());
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2]);
    }
}
