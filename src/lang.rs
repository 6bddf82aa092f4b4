//! Language detection by file extension.
//!
//! Classification is extension-only; file contents are never inspected, so a
//! non-source file with a matching extension is misclassified. Accepted.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

/// Extension table, checked in order: first match wins. `cpp` precedes `c`
/// so a bare `.h` header classifies as C++.
static LANGUAGE_EXTENSIONS: &[(&str, &[&str])] = &[
    ("python", &["py", "pyw", "pyi"]),
    ("javascript", &["js", "mjs", "cjs"]),
    ("typescript", &["ts", "tsx", "mts", "cts"]),
    ("go", &["go"]),
    ("rust", &["rs"]),
    ("java", &["java"]),
    ("cpp", &["cpp", "cc", "cxx", "c++", "hpp", "h", "hh"]),
    ("c", &["c", "h"]),
    ("ruby", &["rb"]),
    ("php", &["php"]),
    ("swift", &["swift"]),
    ("kotlin", &["kt", "kts"]),
    ("scala", &["scala"]),
    ("csharp", &["cs"]),
    ("dart", &["dart"]),
    ("elixir", &["ex", "exs"]),
    ("erlang", &["erl"]),
    ("haskell", &["hs"]),
    ("ocaml", &["ml", "mli"]),
    ("perl", &["pl", "pm"]),
    ("lua", &["lua"]),
    ("r", &["r"]),
    ("julia", &["jl"]),
];

/// Census of a directory: language name to file count, plus the primary
/// (highest-count) language.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageBreakdown {
    pub languages: BTreeMap<String, usize>,
    pub primary_language: Option<String>,
    pub total_files: usize,
}

/// Detect the language of a single file from its extension.
///
/// Returns `None` when no language claims the extension; that is the only
/// failure mode.
pub fn file_language(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    LANGUAGE_EXTENSIONS
        .iter()
        .find(|(_, exts)| exts.contains(&ext.as_str()))
        .map(|(lang, _)| *lang)
}

/// Count files per language under a directory, recursively.
///
/// Unreadable entries are skipped; an empty or missing directory yields an
/// empty map.
pub fn directory_languages(dir: &Path) -> BTreeMap<String, usize> {
    let mut languages = BTreeMap::new();

    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(lang) = file_language(entry.path()) {
            *languages.entry(lang.to_string()).or_insert(0) += 1;
        }
    }

    languages
}

/// Pick the highest-count language; ties break alphabetically.
pub fn primary_language(languages: &BTreeMap<String, usize>) -> Option<String> {
    let mut primary: Option<(&str, usize)> = None;
    for (lang, &count) in languages {
        // Strictly greater keeps the alphabetically first language on ties,
        // since BTreeMap iterates in key order.
        if primary.map_or(true, |(_, best)| count > best) {
            primary = Some((lang, count));
        }
    }
    primary.map(|(lang, _)| lang.to_string())
}

/// Full census for the `detect_languages` operation.
pub fn detect_languages(dir: &Path) -> LanguageBreakdown {
    let languages = directory_languages(dir);
    let primary = primary_language(&languages);
    let total = languages.values().sum();

    LanguageBreakdown {
        languages,
        primary_language: primary,
        total_files: total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_language_by_extension() {
        assert_eq!(file_language(Path::new("main.py")), Some("python"));
        assert_eq!(file_language(Path::new("src/lib.rs")), Some("rust"));
        assert_eq!(file_language(Path::new("app.tsx")), Some("typescript"));
        assert_eq!(file_language(Path::new("index.mjs")), Some("javascript"));
        assert_eq!(file_language(Path::new("cmd/main.go")), Some("go"));
        assert_eq!(file_language(Path::new("script.R")), Some("r"));
        // .h resolves to cpp, which precedes c in the table
        assert_eq!(file_language(Path::new("util.h")), Some("cpp"));
    }

    #[test]
    fn test_file_language_no_match() {
        assert_eq!(file_language(Path::new("notes.txt")), None);
        assert_eq!(file_language(Path::new("Makefile")), None);
        assert_eq!(file_language(Path::new("data.json")), None);
    }

    #[test]
    fn test_directory_languages_counts() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.py"), "x = 1\n").unwrap();
        std::fs::write(temp.path().join("b.py"), "y = 2\n").unwrap();
        std::fs::create_dir(temp.path().join("sub")).unwrap();
        std::fs::write(temp.path().join("sub/c.go"), "package main\n").unwrap();
        std::fs::write(temp.path().join("README.md"), "# readme\n").unwrap();

        let languages = directory_languages(temp.path());
        assert_eq!(languages.get("python"), Some(&2));
        assert_eq!(languages.get("go"), Some(&1));
        assert_eq!(languages.len(), 2);
    }

    #[test]
    fn test_empty_directory() {
        let temp = TempDir::new().unwrap();
        let breakdown = detect_languages(temp.path());

        assert!(breakdown.languages.is_empty());
        assert_eq!(breakdown.primary_language, None);
        assert_eq!(breakdown.total_files, 0);
    }

    #[test]
    fn test_primary_language_highest_count() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.py"), "").unwrap();
        std::fs::write(temp.path().join("b.py"), "").unwrap();
        std::fs::write(temp.path().join("c.rs"), "").unwrap();

        let breakdown = detect_languages(temp.path());
        assert_eq!(breakdown.primary_language.as_deref(), Some("python"));
        assert_eq!(breakdown.total_files, 3);
    }

    #[test]
    fn test_primary_language_tie_breaks_alphabetically() {
        let mut languages = BTreeMap::new();
        languages.insert("rust".to_string(), 3);
        languages.insert("go".to_string(), 3);
        languages.insert("python".to_string(), 1);

        assert_eq!(primary_language(&languages).as_deref(), Some("go"));
    }
}
