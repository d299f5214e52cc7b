//! Error types for bundlegate-lib

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while gating the bundle.
///
/// External-step failures are split into three variants so callers can
/// tell "could not start" from "ran and failed" from "ran but was killed".
#[derive(Debug, Error)]
pub enum GateError {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  /// Traversal of an input root failed (missing path, unreadable directory).
  #[error("failed to walk {path}: {source}")]
  Walk {
    path: PathBuf,
    source: walkdir::Error,
  },

  /// The external command could not be spawned at all.
  #[error("failed to spawn {command}: {source}")]
  Spawn {
    command: String,
    source: std::io::Error,
  },

  /// The external command ran and exited with a non-zero status.
  #[error("{command} exited with code {code}")]
  StepFailed { command: String, code: i32 },

  /// The external command was terminated by a signal rather than exiting.
  #[error("{command} terminated by signal")]
  StepKilled { command: String },
}
