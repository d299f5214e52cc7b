//! Recursive enumeration of regular files under an input root.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{GateError, Result};

/// Collect every regular file reachable from `root` into `out`.
///
/// `root` may be a file (appended directly) or a directory (visited
/// recursively, in whatever order the directory listing yields entries).
/// No filtering by name, extension, or hidden-file convention; symlinks
/// are followed. A missing or unreadable path is an error, not a skip.
pub fn walk(root: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
  for entry in WalkDir::new(root).follow_links(true) {
    let entry = entry.map_err(|source| GateError::Walk {
      path: root.to_path_buf(),
      source,
    })?;
    if entry.file_type().is_file() {
      out.push(entry.into_path());
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;

  fn walk_all(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    walk(root, &mut out).unwrap();
    out
  }

  #[test]
  fn file_root_is_returned_directly() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("single.txt");
    fs::write(&file, "x").unwrap();

    assert_eq!(walk_all(&file), vec![file]);
  }

  #[test]
  fn directory_root_is_walked_recursively() {
    let temp = tempdir().unwrap();
    fs::create_dir_all(temp.path().join("a/b")).unwrap();
    fs::write(temp.path().join("top.txt"), "1").unwrap();
    fs::write(temp.path().join("a/mid.txt"), "2").unwrap();
    fs::write(temp.path().join("a/b/deep.txt"), "3").unwrap();

    let mut files = walk_all(temp.path());
    files.sort();
    assert_eq!(
      files,
      vec![
        temp.path().join("a/b/deep.txt"),
        temp.path().join("a/mid.txt"),
        temp.path().join("top.txt"),
      ]
    );
  }

  #[test]
  fn hidden_files_are_included() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join(".hidden"), "h").unwrap();

    assert_eq!(walk_all(temp.path()).len(), 1);
  }

  #[test]
  fn missing_root_is_an_error() {
    let temp = tempdir().unwrap();
    let mut out = Vec::new();

    let result = walk(&temp.path().join("does-not-exist"), &mut out);
    assert!(matches!(result, Err(GateError::Walk { .. })));
  }
}
