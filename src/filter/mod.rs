//! Tag filtering over the catalog
//!
//! Filtering is a pure function of an image sequence, a chosen tag set and a
//! mode; it preserves the input order and never mutates anything. The session
//! layer stores the resulting view in a [`FilterState`] until it is cleared
//! or replaced.
//!
//! Modes:
//! - `Inclusive` retains an image if its caption shares at least one chosen
//!   tag (any-of).
//! - `Exclusive` retains an image only if its caption contains every chosen
//!   tag (all-of). The name is historical; the behavior is a logical AND,
//!   not a complement.
//! - Ignoring tags is the complement of `Inclusive`: retain images whose
//!   caption shares no chosen tag. It produces a view like any filter but is
//!   a one-shot operation, not a toggled mode.

use std::path::PathBuf;

use crate::catalog::Catalog;

/// Persistent filter mode toggle
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Retain images carrying any chosen tag
    #[default]
    Inclusive,
    /// Retain images carrying all chosen tags
    Exclusive,
}

impl FilterMode {
    /// The other mode
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Inclusive => Self::Exclusive,
            Self::Exclusive => Self::Inclusive,
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Inclusive => "Inclusive",
            Self::Exclusive => "Exclusive",
        }
    }
}

/// Whether one caption satisfies the chosen tags under `mode`
#[must_use]
pub fn caption_matches(caption: &[String], chosen: &[String], mode: FilterMode) -> bool {
    match mode {
        FilterMode::Inclusive => chosen.iter().any(|tag| caption.contains(tag)),
        FilterMode::Exclusive => chosen.iter().all(|tag| caption.contains(tag)),
    }
}

/// Filter `view` down to the images matching the chosen tags
///
/// Order-preserving; images missing from the catalog are treated as having
/// an empty caption.
#[must_use]
pub fn apply(
    view: &[PathBuf],
    catalog: &Catalog,
    chosen: &[String],
    mode: FilterMode,
) -> Vec<PathBuf> {
    view.iter()
        .filter(|image| {
            let caption = catalog.tags(image).unwrap_or(&[]);
            caption_matches(caption, chosen, mode)
        })
        .cloned()
        .collect()
}

/// Filter `view` down to the images carrying none of the chosen tags
#[must_use]
pub fn ignore(view: &[PathBuf], catalog: &Catalog, chosen: &[String]) -> Vec<PathBuf> {
    view.iter()
        .filter(|image| {
            let caption = catalog.tags(image).unwrap_or(&[]);
            !caption_matches(caption, chosen, FilterMode::Inclusive)
        })
        .cloned()
        .collect()
}

/// Live filter state for a session
///
/// Holds the toggled mode, the tags of the active filter and the filtered
/// view itself. When no filter is active the view is `None` and the full
/// catalog is the active view.
#[derive(Debug, Default, Clone)]
pub struct FilterState {
    mode: FilterMode,
    chosen: Vec<String>,
    view: Option<Vec<PathBuf>>,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode toggle
    #[must_use]
    pub const fn mode(&self) -> FilterMode {
        self.mode
    }

    pub const fn set_mode(&mut self, mode: FilterMode) {
        self.mode = mode;
    }

    /// Flip between inclusive and exclusive, returning the new mode
    pub const fn toggle_mode(&mut self) -> FilterMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Whether a filtered view is active
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.view.is_some()
    }

    /// Tags of the active filter (empty when inactive)
    #[must_use]
    pub fn chosen(&self) -> &[String] {
        &self.chosen
    }

    /// The filtered view, if one is active
    #[must_use]
    pub fn view(&self) -> Option<&[PathBuf]> {
        self.view.as_deref()
    }

    /// Install a freshly computed view
    pub fn activate(&mut self, chosen: Vec<String>, view: Vec<PathBuf>) {
        self.chosen = chosen;
        self.view = Some(view);
    }

    /// Drop the active view, keeping the mode toggle
    pub fn clear(&mut self) {
        self.chosen.clear();
        self.view = None;
    }

    /// Forget an image that left the catalog
    pub fn forget(&mut self, image: &std::path::Path) {
        if let Some(view) = &mut self.view {
            view.retain(|p| p != image);
        }
    }
}
