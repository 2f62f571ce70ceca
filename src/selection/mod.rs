//! Image selection
//!
//! Tracks the subset of images the user has chosen out of whichever view is
//! active (full catalog or filter result). Select-all and invert operate
//! against that active view, so under a filter they never touch hidden
//! images; invert is a symmetric difference, meaning selected images outside
//! the view stay selected.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// The set of currently selected images
#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    chosen: HashSet<PathBuf>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one image's selection, returning true if it is now selected
    pub fn toggle(&mut self, image: &Path) -> bool {
        if self.chosen.remove(image) {
            false
        } else {
            self.chosen.insert(image.to_path_buf());
            true
        }
    }

    /// Select every image of the active view
    pub fn select_all(&mut self, view: &[PathBuf]) {
        self.chosen = view.iter().cloned().collect();
    }

    /// Deselect everything
    pub fn clear(&mut self) {
        self.chosen.clear();
    }

    /// Symmetric difference against the active view
    pub fn invert(&mut self, view: &[PathBuf]) {
        for image in view {
            if !self.chosen.remove(image) {
                self.chosen.insert(image.clone());
            }
        }
    }

    /// Drop one image from the selection, returning true if it was selected
    pub fn remove(&mut self, image: &Path) -> bool {
        self.chosen.remove(image)
    }

    #[must_use]
    pub fn contains(&self, image: &Path) -> bool {
        self.chosen.contains(image)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chosen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }

    /// Iterate over the selection in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.chosen.iter().map(PathBuf::as_path)
    }

    /// Selected images in the order `sequence` lists them
    ///
    /// Used to make batch operations deterministic: the catalog's scan order
    /// becomes the processing order.
    #[must_use]
    pub fn in_order(&self, sequence: &[PathBuf]) -> Vec<PathBuf> {
        sequence
            .iter()
            .filter(|image| self.chosen.contains(*image))
            .cloned()
            .collect()
    }

    /// Selection sorted by path, for stable display
    #[must_use]
    pub fn sorted(&self) -> Vec<PathBuf> {
        let mut images: Vec<PathBuf> = self.chosen.iter().cloned().collect();
        images.sort();
        images
    }
}
