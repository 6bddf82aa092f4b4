//! Integration tests for language detection over real fixture trees.

use std::path::PathBuf;

use tempfile::TempDir;

use lintmux::detect_languages;
use lintmux::lang::{directory_languages, file_language, primary_language};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

#[test]
fn test_fixture_files_classify_by_extension() {
    let testdata = testdata_path();
    assert_eq!(file_language(&testdata.join("sample.py")), Some("python"));
    assert_eq!(
        file_language(&testdata.join("mixed/util.ts")),
        Some("typescript")
    );
    assert_eq!(file_language(&testdata.join("mixed/notes.txt")), None);
}

#[test]
fn test_mixed_tree_census() {
    let languages = directory_languages(&testdata_path().join("mixed"));

    assert_eq!(languages.get("python"), Some(&2));
    assert_eq!(languages.get("typescript"), Some(&1));
    // notes.txt is not a recognized source file
    assert_eq!(languages.len(), 2);
    assert_eq!(primary_language(&languages).as_deref(), Some("python"));
}

#[test]
fn test_detect_languages_breakdown() {
    let breakdown = detect_languages(&testdata_path().join("mixed"));

    assert_eq!(breakdown.primary_language.as_deref(), Some("python"));
    assert_eq!(breakdown.total_files, 3);
    assert_eq!(
        breakdown.total_files,
        breakdown.languages.values().sum::<usize>()
    );
}

#[test]
fn test_empty_directory_breakdown() {
    let temp = TempDir::new().unwrap();
    let breakdown = detect_languages(temp.path());

    assert!(breakdown.languages.is_empty());
    assert_eq!(breakdown.primary_language, None);
    assert_eq!(breakdown.total_files, 0);
}

#[test]
fn test_tie_breaks_alphabetically() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("a.rs"), "fn main() {}\n").unwrap();
    std::fs::write(temp.path().join("b.go"), "package main\n").unwrap();

    let breakdown = detect_languages(temp.path());
    assert_eq!(breakdown.languages.get("go"), Some(&1));
    assert_eq!(breakdown.languages.get("rust"), Some(&1));
    assert_eq!(breakdown.primary_language.as_deref(), Some("go"));
}
