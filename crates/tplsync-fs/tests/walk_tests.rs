//! Tests for template scanning and empty-directory pruning

use assert_fs::prelude::*;
use pretty_assertions::assert_eq;
use predicates::prelude::*;
use tplsync_fs::{Error, NormalizedPath, prune_empty_dirs, scan_templates};

fn root_of(temp: &assert_fs::TempDir) -> NormalizedPath {
    NormalizedPath::new(temp.path())
}

#[test]
fn test_scan_finds_nested_templates_with_depth() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a.txt").write_str("A").unwrap();
    temp.child("pvp/b.txt").write_str("B").unwrap();
    temp.child("pvp/monk/c.txt").write_str("C").unwrap();

    let found = scan_templates(&root_of(&temp)).unwrap();
    let listing: Vec<(&str, usize)> = found.iter().map(|f| (f.path.as_str(), f.depth)).collect();

    assert_eq!(
        listing,
        vec![("a.txt", 0), ("pvp/b.txt", 1), ("pvp/monk/c.txt", 2)]
    );
}

#[test]
fn test_scan_skips_other_suffixes_and_database() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("keep.txt").write_str("x").unwrap();
    temp.child("upper.TXT").write_str("x").unwrap();
    temp.child("notes.md").write_str("x").unwrap();
    temp.child("templates.csv").write_str("keep.txt,x\n").unwrap();

    let found = scan_templates(&root_of(&temp)).unwrap();
    let paths: Vec<&str> = found.iter().map(|f| f.path.as_str()).collect();

    assert_eq!(paths, vec!["keep.txt"]);
}

#[test]
fn test_scan_missing_root_is_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    let missing = NormalizedPath::new(temp.path().join("nope"));

    let err = scan_templates(&missing).unwrap_err();
    assert!(matches!(err, Error::RootNotFound { .. }));
}

#[test]
fn test_prune_removes_nested_empty_dirs() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("empty/deeper/deepest").create_dir_all().unwrap();
    temp.child("kept/a.txt").write_str("A").unwrap();

    let removed = prune_empty_dirs(&root_of(&temp)).unwrap();

    assert_eq!(removed, 3);
    temp.child("empty").assert(predicate::path::missing());
    temp.child("kept/a.txt").assert(predicate::path::exists());
    temp.assert(predicate::path::is_dir());
}

#[test]
fn test_prune_keeps_root_even_if_empty() {
    let temp = assert_fs::TempDir::new().unwrap();

    let removed = prune_empty_dirs(&root_of(&temp)).unwrap();

    assert_eq!(removed, 0);
    temp.assert(predicate::path::is_dir());
}

#[test]
fn test_prune_keeps_dirs_holding_non_templates() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("misc/readme.md").write_str("hi").unwrap();

    let removed = prune_empty_dirs(&root_of(&temp)).unwrap();

    assert_eq!(removed, 0);
    temp.child("misc/readme.md").assert(predicate::path::exists());
}
