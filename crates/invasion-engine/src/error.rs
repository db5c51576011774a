//! Error types for the `alien-invasion` binary.
//!
//! [`CliError`] wraps every failure mode between parsing the command line
//! and the end of the run, so `main` can propagate with `?`.

use std::path::PathBuf;

/// Top-level error for the `alien-invasion` binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: invasion_core::config::ConfigError,
    },

    /// The map file could not be opened.
    #[error("cannot open map file {}: {source}", path.display())]
    MapFile {
        /// Path that was tried.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The simulation failed or was cancelled.
    #[error("simulation error: {source}")]
    Simulation {
        /// The underlying simulation error.
        #[from]
        source: invasion_core::error::SimulationError,
    },

    /// The blocking simulation task panicked or was aborted.
    #[error("simulation task failed: {source}")]
    Join {
        /// The underlying join error.
        #[from]
        source: tokio::task::JoinError,
    },
}
