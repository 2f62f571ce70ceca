//! Curation session
//!
//! A `Session` owns all mutable state for one opened directory: the catalog,
//! the tag-frequency index, the selection, the filter state, the background
//! loader and the focused image. Every operation a frontend drives goes
//! through here, which is what keeps catalog, captions and index consistent
//! under tag edits and moves.
//!
//! # Loading
//!
//! `request_load` discards the previous state and starts a worker scan;
//! the finished [`LoadOutcome`] comes back through `poll_load` (or
//! `wait_load` for synchronous callers) and is applied only if its
//! generation is still the latest requested. A load superseded mid-flight
//! resolves to [`LoadApplied::Stale`] and changes nothing.
//!
//! # Mutation discipline
//!
//! Tag edits mutate the catalog first, then the index, then persist the
//! caption; a failed caption write is reported as a warning while the
//! in-memory state stays authoritative. Moves are the other way round: the
//! filesystem outcome decides, and only actually-moved images are pruned
//! from catalog, index and selection.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::captions;
use crate::catalog::Catalog;
use crate::catalog::loader::{LoadOutcome, Loader, ScanError};
use crate::filter::{self, FilterMode, FilterState};
use crate::relocate::{self, RelocationReport, TransferKind};
use crate::selection::SelectionSet;
use crate::tags::{SortDirection, TagIndex};

/// Session error type
pub type Result<T> = std::result::Result<T, SessionError>;

/// Validation failures surfaced to the frontend
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no images selected")]
    EmptySelection,

    #[error("no destination directory chosen")]
    EmptyDestination,

    #[error("tag is empty")]
    EmptyTag,

    #[error("image not in catalog: {}", .0.display())]
    UnknownImage(PathBuf),

    #[error("no focused image")]
    NoFocus,
}

/// What happened when a load outcome reached the session
#[derive(Debug)]
pub enum LoadApplied {
    /// The outcome was current and replaced the session state
    Applied {
        images: usize,
        warnings: Vec<String>,
    },
    /// Superseded by a newer request; discarded without effect
    Stale,
    /// The scan itself failed
    Failed(ScanError),
}

/// Result of a bulk tag edit
#[derive(Debug, Default)]
pub struct TagEditReport {
    /// Images whose caption actually changed
    pub changed: Vec<PathBuf>,
    /// Per-image problems (unknown images, failed caption writes)
    pub warnings: Vec<String>,
    /// True if the focused image changed, so its tag display is stale
    pub refresh_focus: bool,
}

/// A persisted caption reordering
#[derive(Debug)]
pub struct SortedCaption {
    pub tags: Vec<String>,
    /// Set when the new order could not be written to disk
    pub warning: Option<String>,
}

/// All mutable state for one opened directory
#[derive(Debug, Default)]
pub struct Session {
    catalog: Catalog,
    index: TagIndex,
    selection: SelectionSet,
    filter: FilterState,
    loader: Loader,
    focused: Option<PathBuf>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Loading

    /// Discard the current state and start scanning `root` in the background
    ///
    /// Returns the new load's generation. An earlier load still in flight
    /// is not cancelled, its result will simply be recognized as stale.
    pub fn request_load(&mut self, root: impl Into<PathBuf>, include_subdirs: bool) -> u64 {
        self.catalog = Catalog::new();
        self.index.clear();
        self.selection.clear();
        self.filter.clear();
        self.focused = None;
        self.loader.begin(root.into(), include_subdirs)
    }

    /// Apply a finished load outcome if it is still current
    pub fn apply_load(&mut self, outcome: LoadOutcome) -> LoadApplied {
        if !self.loader.is_current(outcome.generation()) {
            return LoadApplied::Stale;
        }
        match outcome.result {
            Ok(loaded) => {
                self.catalog = Catalog::from_entries(loaded.entries);
                self.index.rebuild(self.catalog.all_captions());
                self.selection.clear();
                self.filter.clear();
                self.focused = None;
                LoadApplied::Applied {
                    images: self.catalog.len(),
                    warnings: loaded.warnings,
                }
            }
            Err(e) => LoadApplied::Failed(e),
        }
    }

    /// Apply the next finished load, if one is waiting
    pub fn poll_load(&mut self) -> Option<LoadApplied> {
        let outcome = self.loader.try_recv()?;
        Some(self.apply_load(outcome))
    }

    /// Block until the current load finishes and is applied
    ///
    /// Outcomes of superseded loads arriving first are discarded. Returns
    /// `None` only if the loader channel is gone, which does not happen
    /// while the session is alive.
    pub fn wait_load(&mut self) -> Option<LoadApplied> {
        loop {
            let outcome = self.loader.recv()?;
            match self.apply_load(outcome) {
                LoadApplied::Stale => {}
                applied => return Some(applied),
            }
        }
    }

    // ------------------------------------------------------------------
    // Views and accessors

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn index(&self) -> &TagIndex {
        &self.index
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// The image sequence selection operations currently work over
    #[must_use]
    pub fn active_view(&self) -> &[PathBuf] {
        self.filter.view().unwrap_or_else(|| self.catalog.images())
    }

    #[must_use]
    pub const fn is_filtered(&self) -> bool {
        self.filter.is_active()
    }

    /// Sorted `(tag, count)` rows for the whole catalog
    #[must_use]
    pub fn tag_summary(&self) -> Vec<(String, usize)> {
        self.index.summary()
    }

    // ------------------------------------------------------------------
    // Filtering

    #[must_use]
    pub const fn filter_mode(&self) -> FilterMode {
        self.filter.mode()
    }

    pub const fn set_filter_mode(&mut self, mode: FilterMode) {
        self.filter.set_mode(mode);
    }

    /// Flip inclusive/exclusive, returning the new mode
    pub const fn toggle_filter_mode(&mut self) -> FilterMode {
        self.filter.toggle_mode()
    }

    /// Install a filtered view of the catalog for the chosen tags
    ///
    /// With no tags chosen this is a no-op returning false: the active view
    /// stays whatever it was.
    pub fn filter_images(&mut self, chosen: &[String]) -> bool {
        if chosen.is_empty() {
            return false;
        }
        let view = filter::apply(
            self.catalog.images(),
            &self.catalog,
            chosen,
            self.filter.mode(),
        );
        self.filter.activate(chosen.to_vec(), view);
        true
    }

    /// Install a view of the images carrying none of the chosen tags
    ///
    /// One-shot complement of the inclusive filter; a no-op with no tags.
    pub fn ignore_tags(&mut self, chosen: &[String]) -> bool {
        if chosen.is_empty() {
            return false;
        }
        let view = filter::ignore(self.catalog.images(), &self.catalog, chosen);
        self.filter.activate(chosen.to_vec(), view);
        true
    }

    /// Drop the active filter, reverting to the full catalog
    pub fn clear_filter(&mut self) {
        self.filter.clear();
    }

    // ------------------------------------------------------------------
    // Selection

    /// Toggle one image and make it the focused image
    ///
    /// # Errors
    /// Returns `UnknownImage` for images not in the catalog.
    pub fn toggle_selection(&mut self, image: &Path) -> Result<bool> {
        if !self.catalog.contains(image) {
            return Err(SessionError::UnknownImage(image.to_path_buf()));
        }
        let selected = self.selection.toggle(image);
        self.focused = Some(image.to_path_buf());
        Ok(selected)
    }

    /// Select every image of the active view
    pub fn select_all(&mut self) {
        let view = self.active_view().to_vec();
        self.selection.select_all(&view);
    }

    pub fn deselect_all(&mut self) {
        self.selection.clear();
    }

    /// Invert the selection against the active view
    pub fn invert_selection(&mut self) {
        let view = self.active_view().to_vec();
        self.selection.invert(&view);
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Selected images in catalog order
    #[must_use]
    pub fn selected_images(&self) -> Vec<PathBuf> {
        self.selection.in_order(self.catalog.images())
    }

    // ------------------------------------------------------------------
    // Focus

    /// Make `image` the focused image
    ///
    /// # Errors
    /// Returns `UnknownImage` for images not in the catalog.
    pub fn focus(&mut self, image: &Path) -> Result<()> {
        if !self.catalog.contains(image) {
            return Err(SessionError::UnknownImage(image.to_path_buf()));
        }
        self.focused = Some(image.to_path_buf());
        Ok(())
    }

    #[must_use]
    pub fn focused(&self) -> Option<&Path> {
        self.focused.as_deref()
    }

    /// The focused image's tags, each with its global frequency
    ///
    /// # Errors
    /// Returns `NoFocus` when nothing is focused.
    pub fn focused_caption(&self) -> Result<Vec<(String, usize)>> {
        let focused = self.focused.as_deref().ok_or(SessionError::NoFocus)?;
        let caption = self
            .catalog
            .tags(focused)
            .ok_or_else(|| SessionError::UnknownImage(focused.to_path_buf()))?;
        Ok(caption
            .iter()
            .map(|tag| (tag.clone(), self.index.count(tag)))
            .collect())
    }

    /// Step the focus through the selection (or the catalog when nothing is
    /// selected), wrapping around at either end
    pub fn advance_focus(&mut self, step: i64) -> Option<&Path> {
        let nav: Vec<PathBuf> = if self.selection.is_empty() {
            self.catalog.images().to_vec()
        } else {
            self.selection.sorted()
        };
        if nav.is_empty() {
            return None;
        }

        let position = self
            .focused
            .as_ref()
            .and_then(|focused| nav.iter().position(|p| p == focused));
        let next = match position {
            Some(pos) => {
                let len = nav.len() as i64;
                usize::try_from((pos as i64 + step).rem_euclid(len)).unwrap_or(0)
            }
            None if step >= 0 => 0,
            None => nav.len() - 1,
        };
        self.focused = Some(nav[next].clone());
        self.focused.as_deref()
    }

    // ------------------------------------------------------------------
    // Tag edits

    /// Add `tag` to every listed image that does not carry it yet
    ///
    /// Each image persists its caption immediately; write failures demote to
    /// warnings and the in-memory caption stays changed.
    ///
    /// # Errors
    /// Returns `EmptyTag` if the trimmed tag is empty.
    pub fn apply_tag_to_images(&mut self, images: &[PathBuf], tag: &str) -> Result<TagEditReport> {
        self.edit_tags(images, tag, true)
    }

    /// Remove `tag` from every listed image that carries it
    ///
    /// # Errors
    /// Returns `EmptyTag` if the trimmed tag is empty.
    pub fn remove_tag_from_images(&mut self, images: &[PathBuf], tag: &str) -> Result<TagEditReport> {
        self.edit_tags(images, tag, false)
    }

    /// Add `tag` to the whole selection
    ///
    /// # Errors
    /// Returns `EmptySelection` when nothing is selected, `EmptyTag` for a
    /// blank tag.
    pub fn add_tag_to_selection(&mut self, tag: &str) -> Result<TagEditReport> {
        let images = self.selected_images();
        if images.is_empty() {
            return Err(SessionError::EmptySelection);
        }
        self.apply_tag_to_images(&images, tag)
    }

    /// Remove `tag` from the whole selection
    ///
    /// # Errors
    /// Returns `EmptySelection` when nothing is selected, `EmptyTag` for a
    /// blank tag.
    pub fn remove_tag_from_selection(&mut self, tag: &str) -> Result<TagEditReport> {
        let images = self.selected_images();
        if images.is_empty() {
            return Err(SessionError::EmptySelection);
        }
        self.remove_tag_from_images(&images, tag)
    }

    fn edit_tags(&mut self, images: &[PathBuf], tag: &str, add: bool) -> Result<TagEditReport> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(SessionError::EmptyTag);
        }

        let mut report = TagEditReport::default();
        for image in images {
            if !self.catalog.contains(image) {
                report
                    .warnings
                    .push(format!("not in catalog: {}", image.display()));
                continue;
            }
            let changed = if add {
                self.catalog.add_tag(image, tag)
            } else {
                self.catalog.remove_tag(image, tag)
            };
            if !changed {
                continue;
            }
            if add {
                self.index.on_tag_added(tag);
            } else {
                self.index.on_tag_removed(tag);
            }
            let caption = self.catalog.tags(image).unwrap_or(&[]);
            if let Err(e) = captions::write(image, caption) {
                report.warnings.push(e.to_string());
            }
            report.changed.push(image.clone());
        }

        report.refresh_focus = self
            .focused
            .as_ref()
            .is_some_and(|focused| report.changed.contains(focused));
        Ok(report)
    }

    // ------------------------------------------------------------------
    // Caption sorting

    /// Reorder an image's caption by tag frequency and persist it
    ///
    /// # Errors
    /// Returns `UnknownImage` for images not in the catalog.
    pub fn sort_tags_for_image(
        &mut self,
        image: &Path,
        direction: SortDirection,
    ) -> Result<SortedCaption> {
        let caption = self
            .catalog
            .tags(image)
            .ok_or_else(|| SessionError::UnknownImage(image.to_path_buf()))?;
        let sorted = self.index.sorted_caption(caption, direction);
        self.catalog.set_tags(image, sorted.clone());
        let warning = captions::write(image, &sorted).err().map(|e| e.to_string());
        Ok(SortedCaption {
            tags: sorted,
            warning,
        })
    }

    /// Reorder the focused image's caption by tag frequency
    ///
    /// # Errors
    /// Returns `NoFocus` when nothing is focused.
    pub fn sort_focused_tags(&mut self, direction: SortDirection) -> Result<SortedCaption> {
        let focused = self
            .focused
            .clone()
            .ok_or(SessionError::NoFocus)?;
        self.sort_tags_for_image(&focused, direction)
    }

    // ------------------------------------------------------------------
    // Relocation

    /// Copy the selection (images and captions) into `dest_dir`
    ///
    /// Copying never touches catalog, index or selection.
    ///
    /// # Errors
    /// Returns `EmptySelection`/`EmptyDestination` on unmet preconditions.
    pub fn copy_selection(&self, dest_dir: &Path) -> Result<RelocationReport> {
        let images = self.transfer_candidates(dest_dir)?;
        Ok(relocate::transfer(&images, dest_dir, TransferKind::Copy))
    }

    /// Move the selection into `dest_dir`, reconciling session state
    ///
    /// Every successfully moved image leaves the catalog, its tags are
    /// decremented out of the index and it is dropped from the selection;
    /// failed images stay exactly where they were. A move invalidates the
    /// active filter, so the view reverts to the full catalog.
    ///
    /// # Errors
    /// Returns `EmptySelection`/`EmptyDestination` on unmet preconditions.
    pub fn move_selection(&mut self, dest_dir: &Path) -> Result<RelocationReport> {
        let images = self.transfer_candidates(dest_dir)?;
        let report = relocate::transfer(&images, dest_dir, TransferKind::Move);

        for moved in &report.relocated {
            if let Some(tags) = self.catalog.remove_image(&moved.source) {
                for tag in &tags {
                    self.index.on_tag_removed(tag);
                }
            }
            self.selection.remove(&moved.source);
            if self.focused.as_deref() == Some(moved.source.as_path()) {
                self.focused = None;
            }
        }
        self.filter.clear();

        Ok(report)
    }

    fn transfer_candidates(&self, dest_dir: &Path) -> Result<Vec<PathBuf>> {
        if self.selection.is_empty() {
            return Err(SessionError::EmptySelection);
        }
        if dest_dir.as_os_str().is_empty() {
            return Err(SessionError::EmptyDestination);
        }
        Ok(self.selected_images())
    }
}
