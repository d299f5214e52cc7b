//! The persisted last-known-good fingerprint.
//!
//! The cache record is a single hex digest line at a fixed location. There
//! is no expiry: a build stays up to date until its inputs change or the
//! artifact disappears. A corrupt or half-written record simply fails the
//! comparison and triggers a rebuild.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::Result;

/// Whether the guarded artifact is still valid for `fresh`.
///
/// True only if the record file and the artifact both exist and the stored
/// digest (trimmed of surrounding whitespace) equals `fresh` exactly.
/// Missing files and read failures all mean "out of date", never an error.
pub fn is_up_to_date(record: &Path, artifact: &Path, fresh: &str) -> bool {
  if !artifact.exists() {
    debug!(artifact = %artifact.display(), "artifact missing");
    return false;
  }
  match fs::read_to_string(record) {
    Ok(stored) => stored.trim() == fresh,
    Err(_) => false,
  }
}

/// Persist `fingerprint` to the record file, overwriting any previous value.
///
/// Creates intermediate directories as needed and writes the digest with a
/// trailing newline. Ordinary write semantics; no atomic rename.
pub fn commit(record: &Path, fingerprint: &str) -> Result<()> {
  if let Some(parent) = record.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(record, format!("{}\n", fingerprint))?;
  debug!(record = %record.display(), "committed fingerprint");
  Ok(())
}
