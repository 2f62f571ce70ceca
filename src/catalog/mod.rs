//! The image catalog
//!
//! A `Catalog` is the authoritative list of images discovered in the opened
//! directory, in scan order, together with each image's in-memory tag list.
//! It is built wholesale from a [`loader`] scan and mutated in place by tag
//! edits and moves; it never merges two scans.
//!
//! Tag mutation here is purely in-memory and idempotent. Persisting the
//! caption and keeping the global frequency index in step are the session's
//! job, so the catalog stays a plain data structure that is easy to test.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::ImageEntry;

pub mod loader;

/// Ordered image list plus per-image tags for one opened directory
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    images: Vec<PathBuf>,
    captions: HashMap<PathBuf, Vec<String>>,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from scanned entries, keeping their order
    #[must_use]
    pub fn from_entries(entries: Vec<ImageEntry>) -> Self {
        let mut catalog = Self {
            images: Vec::with_capacity(entries.len()),
            captions: HashMap::with_capacity(entries.len()),
        };
        for entry in entries {
            catalog.captions.insert(entry.path.clone(), entry.tags);
            catalog.images.push(entry.path);
        }
        catalog
    }

    /// All images in scan order
    #[must_use]
    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Whether `image` is catalogued
    #[must_use]
    pub fn contains(&self, image: &Path) -> bool {
        self.captions.contains_key(image)
    }

    /// Tags of one image, `None` if it is not catalogued
    #[must_use]
    pub fn tags(&self, image: &Path) -> Option<&[String]> {
        self.captions.get(image).map(Vec::as_slice)
    }

    /// Iterate over `(image, tags)` pairs in scan order
    pub fn entries(&self) -> impl Iterator<Item = (&Path, &[String])> {
        self.images.iter().map(|image| {
            let tags = self.captions.get(image).map_or(&[][..], Vec::as_slice);
            (image.as_path(), tags)
        })
    }

    /// Iterate over all captions (order unspecified)
    pub fn all_captions(&self) -> impl Iterator<Item = &[String]> {
        self.captions.values().map(Vec::as_slice)
    }

    /// Append `tag` to an image's caption
    ///
    /// Returns true if the caption changed, false if the image already
    /// carried the tag or is not catalogued.
    pub fn add_tag(&mut self, image: &Path, tag: &str) -> bool {
        match self.captions.get_mut(image) {
            Some(tags) if !tags.iter().any(|t| t == tag) => {
                tags.push(tag.to_string());
                true
            }
            _ => false,
        }
    }

    /// Remove `tag` from an image's caption
    ///
    /// Returns true if the caption changed.
    pub fn remove_tag(&mut self, image: &Path, tag: &str) -> bool {
        match self.captions.get_mut(image) {
            Some(tags) => {
                let before = tags.len();
                tags.retain(|t| t != tag);
                tags.len() != before
            }
            None => false,
        }
    }

    /// Replace an image's caption order wholesale
    ///
    /// Used by frequency sorting, which permutes but never adds or drops
    /// tags. Returns false if the image is not catalogued.
    pub fn set_tags(&mut self, image: &Path, tags: Vec<String>) -> bool {
        match self.captions.get_mut(image) {
            Some(existing) => {
                *existing = tags;
                true
            }
            None => false,
        }
    }

    /// Remove an image from the catalog, returning the tags it carried
    pub fn remove_image(&mut self, image: &Path) -> Option<Vec<String>> {
        let tags = self.captions.remove(image)?;
        self.images.retain(|p| p != image);
        Some(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::from_entries(vec![
            ImageEntry::new(PathBuf::from("/g/a.png"), vec!["cat".into(), "grey".into()]),
            ImageEntry::new(PathBuf::from("/g/b.jpg"), vec!["dog".into()]),
            ImageEntry::new(PathBuf::from("/g/c.gif"), vec![]),
        ])
    }

    #[test]
    fn test_from_entries_keeps_scan_order() {
        let catalog = sample();
        let order: Vec<_> = catalog.images().iter().map(|p| p.to_str().unwrap()).collect();
        assert_eq!(order, vec!["/g/a.png", "/g/b.jpg", "/g/c.gif"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_tags_lookup() {
        let catalog = sample();
        assert_eq!(
            catalog.tags(Path::new("/g/a.png")).unwrap(),
            &["cat".to_string(), "grey".to_string()]
        );
        assert_eq!(catalog.tags(Path::new("/g/c.gif")).unwrap(), &[] as &[String]);
        assert!(catalog.tags(Path::new("/g/missing.png")).is_none());
    }

    #[test]
    fn test_add_tag_is_idempotent() {
        let mut catalog = sample();
        let image = Path::new("/g/b.jpg");

        assert!(catalog.add_tag(image, "fluffy"));
        assert!(!catalog.add_tag(image, "fluffy"));
        assert_eq!(catalog.tags(image).unwrap(), &["dog".to_string(), "fluffy".to_string()]);
    }

    #[test]
    fn test_add_tag_unknown_image() {
        let mut catalog = sample();
        assert!(!catalog.add_tag(Path::new("/nowhere.png"), "x"));
    }

    #[test]
    fn test_remove_tag_only_reports_real_changes() {
        let mut catalog = sample();
        let image = Path::new("/g/a.png");

        assert!(catalog.remove_tag(image, "grey"));
        assert!(!catalog.remove_tag(image, "grey"));
        assert_eq!(catalog.tags(image).unwrap(), &["cat".to_string()]);
    }

    #[test]
    fn test_remove_image_preserves_remaining_order() {
        let mut catalog = sample();
        let tags = catalog.remove_image(Path::new("/g/b.jpg")).unwrap();

        assert_eq!(tags, vec!["dog".to_string()]);
        assert!(!catalog.contains(Path::new("/g/b.jpg")));
        let order: Vec<_> = catalog.images().iter().map(|p| p.to_str().unwrap()).collect();
        assert_eq!(order, vec!["/g/a.png", "/g/c.gif"]);
    }

    #[test]
    fn test_set_tags_replaces_order() {
        let mut catalog = sample();
        let image = Path::new("/g/a.png");

        assert!(catalog.set_tags(image, vec!["grey".into(), "cat".into()]));
        assert_eq!(catalog.tags(image).unwrap(), &["grey".to_string(), "cat".to_string()]);
    }
}
