//! Record/replay infrastructure for deterministic testing.
//!
//! Cassettes are YAML files holding every generator call of one run, so CLI
//! tests can replay them without network access.

pub mod format;
pub mod loader;
pub mod recorder;
pub mod replayer;
