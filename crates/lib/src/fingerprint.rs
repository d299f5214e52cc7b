//! Deterministic fingerprint over a set of input roots.
//!
//! The digest folds (normalized relative path, file bytes) pairs in sorted
//! order, so it is insensitive to traversal order, directory listing order,
//! and the host's path-separator convention, while changing whenever a file
//! is edited, renamed, added, or removed.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::Result;
use crate::walk::walk;

/// Replace the host's path separator with `/`.
///
/// Pure string rewrite, no I/O. Used both as the sort key and as the
/// hashed path token so sort order and hash payload match on any platform.
pub fn normalize(path: &Path) -> String {
  path.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "/")
}

/// Compute the fingerprint of `roots` as a lowercase hex SHA-256 digest.
///
/// Each root may be a file or a directory; all reachable regular files are
/// flattened into one list and sorted by normalized path. Paths are hashed
/// relative to `base_dir`, each path and each file body followed by a NUL
/// byte so adjacent fields cannot alias. Overlapping roots hash their
/// shared files once per root; callers pass disjoint roots in practice.
pub fn fingerprint(base_dir: &Path, roots: &[PathBuf]) -> Result<String> {
  let mut files: Vec<PathBuf> = Vec::new();
  for root in roots {
    walk(root, &mut files)?;
  }

  files.sort_by_key(|path| normalize(path));

  let mut hasher = Sha256::new();
  for path in &files {
    let rel = path.strip_prefix(base_dir).unwrap_or(path);
    hasher.update(normalize(rel).as_bytes());
    hasher.update(b"\0");
    hash_file_into(&mut hasher, path)?;
    hasher.update(b"\0");
  }

  let digest = hex::encode(hasher.finalize());
  debug!(files = files.len(), digest = %digest, "computed input fingerprint");
  Ok(digest)
}

/// Stream a file's bytes into the hasher.
fn hash_file_into(hasher: &mut Sha256, path: &Path) -> Result<()> {
  let file = File::open(path)?;
  let mut reader = BufReader::new(file);
  let mut buffer = [0u8; 8192];

  loop {
    let bytes_read = reader.read(&mut buffer)?;
    if bytes_read == 0 {
      break;
    }
    hasher.update(&buffer[..bytes_read]);
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;

  #[test]
  fn digest_is_lowercase_hex() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("a.txt"), "hello").unwrap();

    let digest = fingerprint(temp.path(), &[temp.path().to_path_buf()]).unwrap();
    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
  }

  #[test]
  fn root_order_does_not_matter() {
    let temp = tempdir().unwrap();
    let first = temp.path().join("first");
    let second = temp.path().join("second");
    fs::create_dir_all(&first).unwrap();
    fs::create_dir_all(&second).unwrap();
    fs::write(first.join("a.txt"), "aa").unwrap();
    fs::write(second.join("b.txt"), "bb").unwrap();

    let forward = fingerprint(temp.path(), &[first.clone(), second.clone()]).unwrap();
    let reversed = fingerprint(temp.path(), &[second, first]).unwrap();

    assert_eq!(forward, reversed);
  }

  #[test]
  fn identical_trees_produce_identical_digests() {
    let make_tree = || {
      let temp = tempdir().unwrap();
      fs::create_dir_all(temp.path().join("src")).unwrap();
      fs::write(temp.path().join("manifest.json"), "{}").unwrap();
      fs::write(temp.path().join("src/a.txt"), "hello").unwrap();
      temp
    };

    let left = make_tree();
    let right = make_tree();

    let left_digest = fingerprint(left.path(), &[left.path().to_path_buf()]).unwrap();
    let right_digest = fingerprint(right.path(), &[right.path().to_path_buf()]).unwrap();

    assert_eq!(left_digest, right_digest);
  }

  #[test]
  fn content_change_changes_digest() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("a.txt");
    fs::write(&file, "hello").unwrap();
    let before = fingerprint(temp.path(), &[temp.path().to_path_buf()]).unwrap();

    fs::write(&file, "hello!").unwrap();
    let after = fingerprint(temp.path(), &[temp.path().to_path_buf()]).unwrap();

    assert_ne!(before, after);
  }

  #[test]
  fn rename_changes_digest() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("a.txt"), "same bytes").unwrap();
    let before = fingerprint(temp.path(), &[temp.path().to_path_buf()]).unwrap();

    fs::rename(temp.path().join("a.txt"), temp.path().join("b.txt")).unwrap();
    let after = fingerprint(temp.path(), &[temp.path().to_path_buf()]).unwrap();

    assert_ne!(before, after);
  }

  #[test]
  fn added_and_removed_files_change_digest() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();
    let one = fingerprint(temp.path(), &[temp.path().to_path_buf()]).unwrap();

    fs::write(temp.path().join("b.txt"), "b").unwrap();
    let two = fingerprint(temp.path(), &[temp.path().to_path_buf()]).unwrap();
    assert_ne!(one, two);

    fs::remove_file(temp.path().join("b.txt")).unwrap();
    let three = fingerprint(temp.path(), &[temp.path().to_path_buf()]).unwrap();
    assert_eq!(one, three);
  }

  #[test]
  fn path_and_content_boundaries_do_not_alias() {
    // "ab" + "c" must hash differently from "a" + "bc".
    let left = tempdir().unwrap();
    fs::write(left.path().join("ab"), "c").unwrap();
    let right = tempdir().unwrap();
    fs::write(right.path().join("a"), "bc").unwrap();

    let left_digest = fingerprint(left.path(), &[left.path().to_path_buf()]).unwrap();
    let right_digest = fingerprint(right.path(), &[right.path().to_path_buf()]).unwrap();

    assert_ne!(left_digest, right_digest);
  }

  #[test]
  fn normalize_is_separator_only() {
    let joined = Path::new("src").join("canvas-host").join("a.txt");
    assert_eq!(normalize(&joined), "src/canvas-host/a.txt");
  }
}
