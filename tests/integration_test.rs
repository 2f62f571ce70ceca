//! Integration tests for datcure
//!
//! These tests verify end-to-end behavior through the library surface:
//! loading a directory into a session, filtering, bulk tag edits and
//! relocation, checking both the in-memory state and the on-disk caption
//! files afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use datcure::filter::FilterMode;
use datcure::relocate::{self, TransferKind};
use datcure::session::{LoadApplied, Session};
use datcure::tags::SortDirection;

/// Create an image file (content is irrelevant, only the name matters)
fn add_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"pixels").unwrap();
    path
}

/// Create an image together with its sidecar caption
fn add_captioned(dir: &Path, name: &str, caption: &str) -> PathBuf {
    let path = add_image(dir, name);
    fs::write(path.with_extension("txt"), caption).unwrap();
    path
}

/// Load a directory synchronously into a fresh session
fn load(dir: &Path) -> Session {
    let mut session = Session::new();
    session.request_load(dir, true);
    match session.wait_load().unwrap() {
        LoadApplied::Applied { .. } => session,
        other => panic!("load failed: {other:?}"),
    }
}

fn tags(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

#[test]
fn test_load_scenario_builds_expected_state() {
    let dir = TempDir::new().unwrap();
    let a = add_captioned(dir.path(), "a.jpg", "x, y");
    let b = add_image(dir.path(), "b.jpg");

    let mut session = load(dir.path());

    assert_eq!(session.catalog().len(), 2);
    assert_eq!(session.index().count("x"), 1);
    assert_eq!(session.index().count("y"), 1);
    assert_eq!(session.index().len(), 2);
    assert_eq!(session.catalog().tags(&b).unwrap(), &[] as &[String]);

    session.filter_images(&tags(&["x"]));
    assert_eq!(session.active_view(), &[a]);
}

#[test]
fn test_scan_skips_non_image_files() {
    let dir = TempDir::new().unwrap();
    add_image(dir.path(), "a.png");
    fs::write(dir.path().join("notes.txt"), "just text").unwrap();
    fs::write(dir.path().join("movie.mp4"), "video").unwrap();

    let session = load(dir.path());
    assert_eq!(session.catalog().len(), 1);
}

#[test]
fn test_recursive_and_flat_loading() {
    let dir = TempDir::new().unwrap();
    add_image(dir.path(), "top.png");
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    add_captioned(&sub, "nested.png", "deep");

    let recursive = load(dir.path());
    assert_eq!(recursive.catalog().len(), 2);
    assert_eq!(recursive.index().count("deep"), 1);

    let mut flat = Session::new();
    flat.request_load(dir.path(), false);
    match flat.wait_load().unwrap() {
        LoadApplied::Applied { images, .. } => assert_eq!(images, 1),
        other => panic!("load failed: {other:?}"),
    }
    assert!(!flat.index().contains("deep"));
}

#[test]
fn test_filter_partition_property() {
    let dir = TempDir::new().unwrap();
    add_captioned(dir.path(), "a.png", "cat, grey");
    add_captioned(dir.path(), "b.png", "dog");
    add_image(dir.path(), "c.png");

    let mut session = load(dir.path());
    let chosen = tags(&["cat"]);

    session.filter_images(&chosen);
    let included: Vec<PathBuf> = session.active_view().to_vec();

    session.clear_filter();
    session.ignore_tags(&chosen);
    let ignored: Vec<PathBuf> = session.active_view().to_vec();

    let mut union: Vec<PathBuf> = included.iter().chain(ignored.iter()).cloned().collect();
    union.sort();
    let mut all: Vec<PathBuf> = session.catalog().images().to_vec();
    all.sort();
    assert_eq!(union, all);
    assert!(included.iter().all(|p| !ignored.contains(p)));
}

#[test]
fn test_exclusive_filter_requires_all_tags() {
    let dir = TempDir::new().unwrap();
    let both = add_captioned(dir.path(), "both.png", "cat, dog");
    add_captioned(dir.path(), "cat_only.png", "cat");

    let mut session = load(dir.path());
    session.set_filter_mode(FilterMode::Exclusive);
    session.filter_images(&tags(&["cat", "dog"]));

    assert_eq!(session.active_view(), &[both]);
}

#[test]
fn test_bulk_tag_edit_persists_to_disk() {
    let dir = TempDir::new().unwrap();
    let a = add_captioned(dir.path(), "a.png", "cat");
    let b = add_image(dir.path(), "b.png");

    let mut session = load(dir.path());
    session.select_all();
    let report = session.add_tag_to_selection("curated").unwrap();
    assert_eq!(report.changed.len(), 2);
    assert_eq!(session.index().count("curated"), 2);

    // A fresh load sees what was written.
    let reloaded = load(dir.path());
    assert_eq!(
        reloaded.catalog().tags(&a).unwrap(),
        &["cat".to_string(), "curated".to_string()]
    );
    assert_eq!(reloaded.catalog().tags(&b).unwrap(), &["curated".to_string()]);

    // Removing from one image leaves the other counted.
    let mut session = reloaded;
    session.remove_tag_from_images(&[a.clone()], "curated").unwrap();
    assert_eq!(session.index().count("curated"), 1);
    assert_eq!(fs::read_to_string(a.with_extension("txt")).unwrap(), "cat");
}

#[test]
fn test_move_collision_produces_numbered_pairs() {
    let src_a = TempDir::new().unwrap();
    let src_b = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    let a = add_captioned(src_a.path(), "cat.png", "one");
    let b = add_captioned(src_b.path(), "cat.png", "two");

    let report = relocate::transfer(&[a, b], dest.path(), TransferKind::Move);

    assert!(report.is_complete());
    assert_eq!(
        fs::read_to_string(dest.path().join("cat.txt")).unwrap(),
        "one"
    );
    assert_eq!(
        fs::read_to_string(dest.path().join("cat_1.txt")).unwrap(),
        "two"
    );
    assert!(dest.path().join("cat.png").exists());
    assert!(dest.path().join("cat_1.png").exists());
}

#[test]
fn test_move_prunes_rare_tag_from_session() {
    let dir = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    let x = add_captioned(dir.path(), "x.png", "rare, shared");
    add_captioned(dir.path(), "y.png", "shared");

    let mut session = load(dir.path());
    session.toggle_selection(&x).unwrap();
    let report = session.move_selection(dest.path()).unwrap();

    assert!(report.is_complete());
    assert!(!session.catalog().contains(&x));
    assert!(!session.index().contains("rare"));
    assert_eq!(session.index().count("shared"), 1);
    assert_eq!(session.selected_count(), 0);
    assert!(!x.exists());
    assert!(dest.path().join("x.png").exists());
}

#[test]
fn test_copy_is_side_effect_free_in_memory() {
    let dir = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    let a = add_captioned(dir.path(), "a.png", "keep");

    let mut session = load(dir.path());
    session.toggle_selection(&a).unwrap();
    session.copy_selection(dest.path()).unwrap();

    assert!(session.catalog().contains(&a));
    assert_eq!(session.index().count("keep"), 1);
    assert_eq!(session.selected_count(), 1);
    assert!(a.exists());
    assert_eq!(
        fs::read_to_string(dest.path().join("a.txt")).unwrap(),
        "keep"
    );
}

#[test]
fn test_partial_batch_failure_is_isolated() {
    let dir = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    let ghost = dir.path().join("ghost.png");
    let real = add_captioned(dir.path(), "real.png", "ok");

    let report = relocate::transfer(&[ghost.clone(), real], dest.path(), TransferKind::Move);

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].source, ghost);
    assert_eq!(report.relocated.len(), 1);
    assert!(dest.path().join("real.png").exists());
}

#[test]
fn test_stale_load_is_never_applied() {
    let first = TempDir::new().unwrap();
    add_captioned(first.path(), "old.png", "old");
    let second = TempDir::new().unwrap();
    add_captioned(second.path(), "new.png", "new");

    let mut session = Session::new();
    session.request_load(first.path(), true);
    session.request_load(second.path(), true);

    match session.wait_load().unwrap() {
        LoadApplied::Applied { images, .. } => assert_eq!(images, 1),
        other => panic!("load failed: {other:?}"),
    }
    assert!(session.index().contains("new"));
    assert!(!session.index().contains("old"));
    assert!(session.catalog().contains(&second.path().join("new.png")));
}

#[test]
fn test_sorted_caption_survives_reload() {
    let dir = TempDir::new().unwrap();
    let a = add_captioned(dir.path(), "a.png", "rare, common");
    add_captioned(dir.path(), "b.png", "common");

    let mut session = load(dir.path());
    let sorted = session
        .sort_tags_for_image(&a, SortDirection::Descending)
        .unwrap();
    assert_eq!(sorted.tags, vec!["common", "rare"]);

    let reloaded = load(dir.path());
    assert_eq!(
        reloaded.catalog().tags(&a).unwrap(),
        &["common".to_string(), "rare".to_string()]
    );
}

#[test]
fn test_messy_caption_normalizes_on_edit() {
    let dir = TempDir::new().unwrap();
    let a = add_captioned(dir.path(), "a.png", "  cat ,,  grey fur , ");

    let mut session = load(dir.path());
    assert_eq!(
        session.catalog().tags(&a).unwrap(),
        &["cat".to_string(), "grey fur".to_string()]
    );

    session.apply_tag_to_images(&[a.clone()], "new").unwrap();
    assert_eq!(
        fs::read_to_string(a.with_extension("txt")).unwrap(),
        "cat, grey fur, new"
    );
}
