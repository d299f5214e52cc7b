//! Synchronous execution of external build steps.
//!
//! Steps run with the caller's stdio inherited, so the child's output shows
//! up as if the gate printed it. There is no timeout and no retry: a step
//! runs to completion or fails the whole gate.

use std::path::Path;
use std::process::Command;

use tracing::info;

use crate::{GateError, Result};

/// Run `program` with `args` in `cwd`, blocking until it exits.
///
/// Fails if the process cannot be spawned, exits non-zero (the code is
/// carried in the error), or is terminated by a signal.
pub fn run_step(program: &str, args: &[String], cwd: &Path) -> Result<()> {
  info!(command = %program, cwd = %cwd.display(), "running external step");

  let status = step_command(program, args, cwd)
    .status()
    .map_err(|source| GateError::Spawn {
      command: program.to_string(),
      source,
    })?;

  match status.code() {
    Some(0) => Ok(()),
    Some(code) => Err(GateError::StepFailed {
      command: program.to_string(),
      code,
    }),
    None => Err(GateError::StepKilled {
      command: program.to_string(),
    }),
  }
}

#[cfg(not(windows))]
fn step_command(program: &str, args: &[String], cwd: &Path) -> Command {
  let mut command = Command::new(program);
  command.args(args).current_dir(cwd);
  command
}

/// Package-manager entry points are `.cmd` shims on Windows, which only the
/// shell can resolve, so the step is routed through `cmd /C` there.
#[cfg(windows)]
fn step_command(program: &str, args: &[String], cwd: &Path) -> Command {
  let mut command = Command::new("cmd");
  command.arg("/C").arg(program).args(args).current_dir(cwd);
  command
}
