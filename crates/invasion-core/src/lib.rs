//! Parsing, randomness, and the step engine for the alien invasion
//! simulator.
//!
//! This crate drives a [`WorldMap`] through its whole life cycle: map text
//! is parsed into cities and links, aliens are spawned and dropped on
//! random cities, the step loop moves them until a termination condition
//! holds, and the surviving cities are written out.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `invasion-config.yaml` into
//!   strongly-typed structs.
//! - [`engine`] -- The [`SimulationEngine`] state machine and the
//!   move-to-city collision protocol.
//! - [`error`] -- [`SimulationError`], the single error type of a run.
//! - [`parse`] -- Line-oriented map text parser.
//! - [`random`] -- [`RandomSource`] trait with seeded and scripted
//!   implementations.
//! - [`report`] -- Engine phases, end reasons, and the run summary.
//! - [`stop`] -- [`StopSignal`], the cooperative cancellation flag.
//!
//! [`WorldMap`]: invasion_world::WorldMap
//! [`SimulationEngine`]: engine::SimulationEngine
//! [`SimulationError`]: error::SimulationError
//! [`RandomSource`]: random::RandomSource
//! [`StopSignal`]: stop::StopSignal

pub mod config;
pub mod engine;
pub mod error;
pub mod parse;
pub mod random;
pub mod report;
pub mod stop;
