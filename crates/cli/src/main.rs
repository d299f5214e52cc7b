//! bundlegate: incremental gate for the canvas-host UI bundle.
//!
//! Fingerprints the bundle inputs (manifests, renderer sources, host app
//! sources) and re-runs the compile and bundle steps only when something
//! changed. In workspaces that ship without the bundle sources (Docker
//! builds exclude vendor/ and apps/), the prebuilt bundle is kept as-is.

use std::path::{Path, PathBuf};

use anyhow::Result;
use bundlegate_lib::{BuildStep, GateConfig, Outcome, run_gate};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// bundlegate - rebuild the canvas bundle only when its inputs changed
#[derive(Parser)]
#[command(name = "bundlegate")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Project root (defaults to the current directory)
  #[arg(long, default_value = ".")]
  root: PathBuf,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,
}

/// The fixed layout the gate protects, resolved against the project root.
fn canvas_bundle_config(root: &Path) -> GateConfig {
  let renderer_dir = root.join("vendor/canvas-ui/renderers/lit");
  let app_dir = root.join("apps/canvas-host");

  GateConfig {
    root_dir: root.to_path_buf(),
    manifest_files: vec![root.join("package.json"), root.join("pnpm-lock.yaml")],
    source_dirs: vec![renderer_dir.clone(), app_dir.clone()],
    hash_file: root.join("src/canvas-host/bundle/.bundle.hash"),
    artifact: root.join("src/canvas-host/bundle/canvas.bundle.js"),
    steps: vec![
      // Compile the renderer TS first; the bundle step consumes its output.
      BuildStep::new(
        "pnpm",
        [
          "-s".to_string(),
          "exec".to_string(),
          "tsc".to_string(),
          "-p".to_string(),
          renderer_dir.join("tsconfig.json").display().to_string(),
        ],
      ),
      BuildStep::new(
        "pnpm",
        [
          "-s".to_string(),
          "exec".to_string(),
          "rolldown".to_string(),
          "-c".to_string(),
          app_dir.join("rolldown.config.mjs").display().to_string(),
        ],
      ),
    ],
  }
}

fn run(cli: &Cli) -> Result<()> {
  let config = canvas_bundle_config(&cli.root);

  match run_gate(&config)? {
    Outcome::SourcesMissing => println!("canvas sources missing; keeping prebuilt bundle."),
    Outcome::UpToDate => println!("canvas bundle up to date; skipping."),
    Outcome::Rebuilt => println!("canvas bundle rebuilt."),
  }

  Ok(())
}

fn main() {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::from_default_env()
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .without_time()
    .init();

  if let Err(err) = run(&cli) {
    // Keep this aligned with the old shell script so CI/user guidance stays familiar.
    eprintln!("{err:#}");
    eprintln!("Canvas bundling failed. Re-run with: pnpm canvas:bundle");
    eprintln!("If this persists, verify pnpm deps and try again.");
    std::process::exit(1);
  }
}
