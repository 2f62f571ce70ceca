//! Global tag-frequency index
//!
//! The index maps every tag to the number of catalogued images whose caption
//! currently contains it. It is the reverse view of the caption data and is
//! maintained incrementally: callers notify it of every tag added to or
//! removed from an image, and it prunes entries the moment their count
//! reaches zero. A tag with no carriers does not exist as far as the index
//! is concerned.

use std::collections::HashMap;

/// Direction for frequency-ordered caption sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Rarest tags first
    Ascending,
    /// Most frequent tags first
    Descending,
}

/// Tag → usage-count index over the active catalog
///
/// Invariants: no entry ever holds a zero or negative count, and the key set
/// is exactly the set of all tags in use.
#[derive(Debug, Default, Clone)]
pub struct TagIndex {
    frequency: HashMap<String, usize>,
}

impl TagIndex {
    /// Create an empty index
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that one more image carries `tag`
    pub fn on_tag_added(&mut self, tag: &str) {
        *self.frequency.entry(tag.to_string()).or_insert(0) += 1;
    }

    /// Record that one fewer image carries `tag`
    ///
    /// The entry is dropped entirely when its count reaches zero. Removing a
    /// tag the index does not know is a no-op.
    pub fn on_tag_removed(&mut self, tag: &str) {
        if let Some(count) = self.frequency.get_mut(tag) {
            if *count > 1 {
                *count -= 1;
            } else {
                self.frequency.remove(tag);
            }
        }
    }

    /// Recompute the whole index from caption data
    pub fn rebuild<'a>(&mut self, all_captions: impl IntoIterator<Item = &'a [String]>) {
        self.frequency.clear();
        for caption in all_captions {
            for tag in caption {
                self.on_tag_added(tag);
            }
        }
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.frequency.clear();
    }

    /// Number of images currently carrying `tag` (zero if unknown)
    #[must_use]
    pub fn count(&self, tag: &str) -> usize {
        self.frequency.get(tag).copied().unwrap_or(0)
    }

    /// Whether any image carries `tag`
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.frequency.contains_key(tag)
    }

    /// Number of distinct tags in use
    #[must_use]
    pub fn len(&self) -> usize {
        self.frequency.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frequency.is_empty()
    }

    /// Iterate over all tags in use, in no particular order
    pub fn all_tags(&self) -> impl Iterator<Item = &str> {
        self.frequency.keys().map(String::as_str)
    }

    /// `(tag, count)` pairs sorted alphabetically by tag
    #[must_use]
    pub fn summary(&self) -> Vec<(String, usize)> {
        let mut rows: Vec<(String, usize)> = self
            .frequency
            .iter()
            .map(|(tag, count)| (tag.clone(), *count))
            .collect();
        rows.sort();
        rows
    }

    /// Reorder one caption by `(frequency, tag)`
    ///
    /// Ascending puts the rarest tags first; descending the most frequent.
    /// Ties break alphabetically in both directions.
    #[must_use]
    pub fn sorted_caption(&self, caption: &[String], direction: SortDirection) -> Vec<String> {
        let mut tags = caption.to_vec();
        match direction {
            SortDirection::Ascending => {
                tags.sort_by(|a, b| (self.count(a), a).cmp(&(self.count(b), b)));
            }
            SortDirection::Descending => {
                tags.sort_by(|a, b| self.count(b).cmp(&self.count(a)).then_with(|| a.cmp(b)));
            }
        }
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caption(tags: &[&str]) -> Vec<String> {
        tags.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_add_and_count() {
        let mut index = TagIndex::new();
        index.on_tag_added("cat");
        index.on_tag_added("cat");
        index.on_tag_added("dog");

        assert_eq!(index.count("cat"), 2);
        assert_eq!(index.count("dog"), 1);
        assert_eq!(index.count("bird"), 0);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_remove_prunes_zero_counts() {
        let mut index = TagIndex::new();
        index.on_tag_added("cat");
        index.on_tag_added("cat");

        index.on_tag_removed("cat");
        assert_eq!(index.count("cat"), 1);
        assert!(index.contains("cat"));

        index.on_tag_removed("cat");
        assert_eq!(index.count("cat"), 0);
        assert!(!index.contains("cat"));
        assert!(index.is_empty());
    }

    #[test]
    fn test_remove_unknown_tag_is_noop() {
        let mut index = TagIndex::new();
        index.on_tag_removed("ghost");
        assert!(index.is_empty());
        assert_eq!(index.count("ghost"), 0);
    }

    #[test]
    fn test_rebuild_from_captions() {
        let captions = [caption(&["x", "y"]), caption(&["y"]), caption(&[])];
        let mut index = TagIndex::new();
        index.on_tag_added("stale");

        index.rebuild(captions.iter().map(Vec::as_slice));

        assert_eq!(index.count("x"), 1);
        assert_eq!(index.count("y"), 2);
        assert!(!index.contains("stale"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_summary_is_sorted_by_tag() {
        let mut index = TagIndex::new();
        index.on_tag_added("zebra");
        index.on_tag_added("ant");
        index.on_tag_added("ant");

        assert_eq!(
            index.summary(),
            vec![("ant".to_string(), 2), ("zebra".to_string(), 1)]
        );
    }

    #[test]
    fn test_sorted_caption_ascending() {
        let mut index = TagIndex::new();
        for _ in 0..3 {
            index.on_tag_added("common");
        }
        index.on_tag_added("rare");
        index.on_tag_added("mid");
        index.on_tag_added("mid");

        let sorted = index.sorted_caption(&caption(&["common", "rare", "mid"]), SortDirection::Ascending);
        assert_eq!(sorted, vec!["rare", "mid", "common"]);
    }

    #[test]
    fn test_sorted_caption_descending_breaks_ties_alphabetically() {
        let mut index = TagIndex::new();
        index.on_tag_added("beta");
        index.on_tag_added("alpha");
        for _ in 0..2 {
            index.on_tag_added("top");
        }

        let sorted = index.sorted_caption(&caption(&["beta", "top", "alpha"]), SortDirection::Descending);
        assert_eq!(sorted, vec!["top", "alpha", "beta"]);
    }
}
