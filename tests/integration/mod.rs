// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use limvoc::{CommitStrategy, RewriteConfig};

/// Test fixture helper for a temporary directory holding a document, a vocabulary and a staging path
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self { temp_dir, root_path }
    }

    /// Write a file under the fixture root
    pub fn create_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    pub fn create_document(&self, content: &str) -> PathBuf {
        self.create_file("document.txt", content)
    }

    pub fn create_vocabulary(&self, content: &str) -> PathBuf {
        self.create_file("vocabulary.txt", content)
    }

    /// Staging path inside the fixture so parallel tests never share one
    pub fn staging_path(&self) -> PathBuf {
        self.root_path.join("temp.txt")
    }

    pub fn config(&self, commit: CommitStrategy) -> RewriteConfig {
        RewriteConfig {
            staging_path: self.staging_path(),
            commit,
            ..RewriteConfig::default()
        }
    }

    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).expect("Failed to read file")
    }
}

/// Positions and characters of every delimiter in a document
pub fn delimiter_sequence(text: &str) -> Vec<char> {
    text.chars().filter(|c| *c == ' ' || *c == '\n').collect()
}

/// Parse a vocabulary table into its groups, skipping empty tokens
pub fn groups_of(table: &str) -> Vec<HashSet<String>> {
    table
        .lines()
        .map(|line| {
            line.split(',')
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect::<HashSet<_>>()
        })
        .filter(|g| !g.is_empty())
        .collect()
}

/// Assert that `output` is a valid rewrite of `input` under `table`:
/// same delimiters, every matched word replaced by a member of its first group,
/// every unmatched word unchanged
pub fn assert_valid_rewrite(input: &str, output: &str, table: &str) {
    assert_eq!(
        delimiter_sequence(output),
        delimiter_sequence(input),
        "Delimiter structure changed"
    );

    let groups = groups_of(table);
    let split = |s: &str| -> Vec<String> { s.split([' ', '\n']).map(str::to_string).collect() };
    let input_words = split(input);
    let output_words = split(output);
    assert_eq!(input_words.len(), output_words.len());

    for (original, replaced) in input_words.iter().zip(output_words.iter()) {
        match groups.iter().find(|g| g.contains(original)) {
            Some(group) => assert!(
                group.contains(replaced),
                "{replaced} is not a synonym of {original}"
            ),
            None => assert_eq!(original, replaced, "Unmatched word changed"),
        }
    }
}
