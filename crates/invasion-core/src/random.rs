//! Injected source of uniform random indices.
//!
//! The engine never touches a generator directly. It asks a
//! [`RandomSource`] for an index in `[0, n)` and fails the run if none can
//! be produced. Two implementations ship with the crate:
//!
//! - [`SeededRandom`] wraps a [`StdRng`] seeded exactly once, so a run is
//!   reproducible from its seed.
//! - [`SequenceRandom`] replays a scripted list of indices and is meant
//!   for tests that need to steer every draw.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

/// Errors produced by a [`RandomSource`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RandomError {
    /// No index could be drawn below `bound`: the bound was zero, the
    /// script ran dry, or a scripted value was out of range.
    #[error("random out of bounds (bound: {bound})")]
    OutOfBounds {
        /// Exclusive upper bound that was requested.
        bound: usize,
    },
}

/// A source of uniform integers in `[0, n)`.
pub trait RandomSource {
    /// Draw an index in `[0, bound)`.
    ///
    /// # Errors
    ///
    /// Returns [`RandomError::OutOfBounds`] if `bound` is zero or the
    /// source cannot produce a value in range.
    fn random_index(&mut self, bound: usize) -> Result<usize, RandomError>;
}

/// Pseudo-random source backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: StdRng,
}

impl SeededRandom {
    /// Create a source seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a source with a fresh seed drawn from the thread RNG.
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    /// The seed this source was created with.
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn random_index(&mut self, bound: usize) -> Result<usize, RandomError> {
        if bound == 0 {
            return Err(RandomError::OutOfBounds { bound });
        }
        let index = self.rng.random_range(0..bound);
        trace!(bound, index, "random draw");
        Ok(index)
    }
}

/// Scripted source that hands out a fixed list of indices in order.
#[derive(Debug, Clone, Default)]
pub struct SequenceRandom {
    values: VecDeque<usize>,
}

impl SequenceRandom {
    /// Create a source that will return `values` one by one.
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Number of scripted values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for SequenceRandom {
    fn random_index(&mut self, bound: usize) -> Result<usize, RandomError> {
        let index = self
            .values
            .pop_front()
            .filter(|value| *value < bound)
            .ok_or(RandomError::OutOfBounds { bound })?;
        trace!(bound, index, "scripted draw");
        Ok(index)
    }
}
