//! City graph, aliens, and occupancy for the alien invasion simulator.
//!
//! This crate models the invaded world: cities as nodes of a directed
//! graph with at most one outgoing link per [`Direction`], aliens as
//! agents placed on those cities, and the indices that tie them together.
//!
//! # Modules
//!
//! - [`alien`] -- The [`Alien`] entity and its display form.
//! - [`city`] -- The [`City`] entity with its four fixed link slots and
//!   canonical rendering.
//! - [`error`] -- Error types for graph-consistency violations.
//! - [`world_map`] -- The [`WorldMap`] store: name index, occupancy,
//!   trapped set, and the reverse-link index used for cascading
//!   destruction.
//!
//! [`Direction`]: invasion_types::Direction

pub mod alien;
pub mod city;
pub mod error;
pub mod world_map;

pub use alien::Alien;
pub use city::{City, Link};
pub use error::WorldError;
pub use world_map::WorldMap;
