//! The orchestrator: decide, rebuild, persist.
//!
//! A gate run is fully sequential: source availability check, fingerprint,
//! cache comparison, then the external steps one after another (the bundle
//! step consumes the compile step's outputs), then the cache commit.

use std::path::PathBuf;

use tracing::info;

use crate::Result;
use crate::cache;
use crate::fingerprint::fingerprint;
use crate::runner::run_step;

/// One opaque external build command, run from the gate's root directory.
#[derive(Debug, Clone)]
pub struct BuildStep {
  pub program: String,
  pub args: Vec<String>,
}

impl BuildStep {
  pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self {
      program: program.into(),
      args: args.into_iter().map(Into::into).collect(),
    }
  }
}

/// Everything a gate run needs, resolved to absolute paths by the caller.
#[derive(Debug, Clone)]
pub struct GateConfig {
  /// Base directory: fingerprint paths are relative to it and steps run in it.
  pub root_dir: PathBuf,
  /// Manifest files that always participate in the fingerprint.
  pub manifest_files: Vec<PathBuf>,
  /// Source trees required for a rebuild. If any is missing the gate keeps
  /// the prebuilt artifact and never consults the cache.
  pub source_dirs: Vec<PathBuf>,
  /// Cache record holding the last-known-good fingerprint.
  pub hash_file: PathBuf,
  /// The produced artifact; checked for existence only.
  pub artifact: PathBuf,
  /// External steps, run in order on a cache miss.
  pub steps: Vec<BuildStep>,
}

/// How a gate run concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  /// A required source tree is absent; the prebuilt artifact was kept.
  SourcesMissing,
  /// Fingerprint matched the cache record and the artifact exists.
  UpToDate,
  /// The steps ran and the new fingerprint was committed.
  Rebuilt,
}

/// Run the gate to completion.
///
/// On step failure the error propagates with the cache record untouched, so
/// the next invocation attempts the rebuild again. Partial outputs of a
/// failed step are left as-is; nothing is rolled back.
pub fn run_gate(config: &GateConfig) -> Result<Outcome> {
  for dir in &config.source_dirs {
    if !dir.exists() {
      info!(dir = %dir.display(), "source tree missing, keeping prebuilt artifact");
      return Ok(Outcome::SourcesMissing);
    }
  }

  let mut inputs = config.manifest_files.clone();
  inputs.extend(config.source_dirs.iter().cloned());
  let fresh = fingerprint(&config.root_dir, &inputs)?;

  if cache::is_up_to_date(&config.hash_file, &config.artifact, &fresh) {
    info!("inputs unchanged, artifact up to date");
    return Ok(Outcome::UpToDate);
  }

  for step in &config.steps {
    run_step(&step.program, &step.args, &config.root_dir)?;
  }

  cache::commit(&config.hash_file, &fresh)?;
  Ok(Outcome::Rebuilt)
}
