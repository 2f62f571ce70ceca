//! Testing utilities for datcure
//!
//! Provides an RAII gallery fixture: a temporary directory populated with
//! image files (content does not matter, only names and extensions do) and
//! their sidecar caption files.
//!
//! Only available when compiled with `cfg(test)`.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Temporary image gallery that cleans up on drop
///
/// # Examples
/// ```ignore
/// let gallery = GalleryFixture::new();
/// let image = gallery.add_captioned_image("cat.png", &["cat", "grey"]);
/// assert!(image.exists());
/// // Directory removed when `gallery` is dropped
/// ```
pub struct GalleryFixture {
    dir: TempDir,
}

impl GalleryFixture {
    /// Create an empty gallery in a fresh temporary directory
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp gallery");
        Self { dir }
    }

    /// Root directory of the gallery
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Create an image file with no caption, returning its path
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn add_image(&self, name: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::write(&path, b"not really pixels").expect("failed to write image");
        path
    }

    /// Create an image file inside a subdirectory, returning its path
    ///
    /// # Panics
    /// Panics if the directory or file cannot be created.
    pub fn add_image_in(&self, subdir: &str, name: &str) -> PathBuf {
        let dir = self.root().join(subdir);
        fs::create_dir_all(&dir).expect("failed to create subdir");
        let path = dir.join(name);
        fs::write(&path, b"not really pixels").expect("failed to write image");
        path
    }

    /// Create an image together with a caption file, returning the image path
    ///
    /// # Panics
    /// Panics if either file cannot be written.
    pub fn add_captioned_image(&self, name: &str, tags: &[&str]) -> PathBuf {
        let path = self.add_image(name);
        let caption = path.with_extension("txt");
        fs::write(&caption, tags.join(", ")).expect("failed to write caption");
        path
    }

    /// Write arbitrary text into a file at the gallery root
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write_caption_raw(&self, name: &str, text: &str) {
        fs::write(self.root().join(name), text).expect("failed to write file");
    }
}

impl Default for GalleryFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_files() {
        let gallery = GalleryFixture::new();
        let image = gallery.add_captioned_image("cat.png", &["cat", "grey"]);

        assert!(image.exists());
        let caption = image.with_extension("txt");
        assert_eq!(fs::read_to_string(caption).unwrap(), "cat, grey");
    }

    #[test]
    fn test_fixture_cleanup_on_drop() {
        let root;
        {
            let gallery = GalleryFixture::new();
            gallery.add_image("a.png");
            root = gallery.root().to_path_buf();
            assert!(root.exists());
        }
        assert!(!root.exists());
    }

    #[test]
    fn test_fixture_subdirectories() {
        let gallery = GalleryFixture::new();
        let nested = gallery.add_image_in("deep/nest", "a.png");
        assert!(nested.exists());
        assert!(nested.starts_with(gallery.root()));
    }
}
