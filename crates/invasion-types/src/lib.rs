//! Shared type definitions for the alien invasion simulator.
//!
//! This crate holds the leaf types every other crate in the workspace
//! builds on. It has no behavior beyond parsing and rendering.
//!
//! # Modules
//!
//! - [`ids`] -- Strongly-typed numeric identifiers for cities and aliens
//! - [`enums`] -- The closed [`Direction`] enumeration used to key links

pub mod enums;
pub mod ids;

pub use enums::{Direction, UnknownDirection};
pub use ids::{AlienId, CityId};
