//! bundlegate-lib: Content-addressed change detection for the canvas bundle
//!
//! This crate decides whether the bundling pipeline needs to re-run by
//! fingerprinting its inputs:
//! - `walk`: recursive enumeration of regular files under input roots
//! - `fingerprint`: deterministic SHA-256 digest over sorted (path, bytes) pairs
//! - `cache`: the persisted last-known-good fingerprint
//! - `runner`: synchronous execution of external build steps
//! - `gate`: the orchestrator wiring the above together

pub mod cache;
pub mod error;
pub mod fingerprint;
pub mod gate;
pub mod runner;
pub mod walk;

pub use error::GateError;
pub use fingerprint::{fingerprint, normalize};
pub use gate::{BuildStep, GateConfig, Outcome, run_gate};

/// Result type for gate operations
pub type Result<T> = std::result::Result<T, GateError>;
