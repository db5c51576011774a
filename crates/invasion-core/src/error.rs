//! Error types for a simulation run.
//!
//! [`SimulationError`] is returned by every fallible engine operation. It
//! wraps the world and randomness errors unchanged so the caller can tell
//! the kinds apart, and adds the parse and cancellation kinds that only
//! the engine can produce.

use invasion_world::WorldError;

use crate::random::RandomError;

/// Errors that can occur while parsing, preparing, or stepping a run.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// A map line could not be parsed.
    #[error("invalid city definition on line {line}: {reason}")]
    ParseCityDefinition {
        /// 1-based line number in the map text.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// A world-graph operation was rejected.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// The random source could not produce an index.
    #[error("random error: {source}")]
    Random {
        /// The underlying random error.
        #[from]
        source: RandomError,
    },

    /// Reading the map or writing the output failed.
    #[error("i/o error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The run was stopped before it could finish.
    #[error("the context was cancelled")]
    ContextCancelled,
}

impl SimulationError {
    /// Build a parse error for the given 1-based line.
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::ParseCityDefinition {
            line,
            reason: reason.into(),
        }
    }
}
