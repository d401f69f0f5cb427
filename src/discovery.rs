//! Test script discovery.
//!
//! Recursively scans a directory tree for test scripts. Directories are
//! descended into, never yielded; files without the test extension are
//! ignored outright (they are not "skipped" tests, they are simply not
//! tests). The returned list is sorted so a run reports in a deterministic
//! order.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::HarnessError;

/// Recursively collects every regular file under `root` carrying the given
/// extension, sorted by path.
pub fn discover_test_files(root: &Path, ext: &str) -> Result<Vec<PathBuf>, HarnessError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if !has_extension(path, ext) {
            continue;
        }

        files.push(path.to_path_buf());
    }
    files.sort();
    Ok(files)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn finds_only_matching_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.mag"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/b.mag"), "").unwrap();

        let files = discover_test_files(dir.path(), "mag").unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.extension().unwrap() == "mag"));
    }

    #[test]
    fn result_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["z.mag", "a.mag", "m.mag"] {
            fs::write(dir.path().join(name), "").unwrap();
        }

        let files = discover_test_files(dir.path(), "mag").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.mag", "m.mag", "z.mag"]);
    }

    #[test]
    fn directories_are_never_yielded() {
        let dir = tempfile::tempdir().unwrap();
        // A directory whose name looks like a test file.
        fs::create_dir(dir.path().join("trap.mag")).unwrap();

        let files = discover_test_files(dir.path(), "mag").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn empty_tree_is_empty_run() {
        let dir = tempfile::tempdir().unwrap();
        let files = discover_test_files(dir.path(), "mag").unwrap();
        assert!(files.is_empty());
    }
}
