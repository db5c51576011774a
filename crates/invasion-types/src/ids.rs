//! Type-safe identifier wrappers around plain integers.
//!
//! Cities and aliens each get their own identifier type so a city handle
//! can never be passed where an alien is expected. City identifiers are
//! issued by the world store in creation order; alien identifiers are
//! chosen by the engine (`1..=N` at spawn time).

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around [`u32`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Wrap a raw identifier value.
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Return the inner integer value.
            pub const fn into_inner(self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Handle for a city (node in the world graph).
    ///
    /// Handles are never reused: once a city is destroyed its handle stays
    /// dead for the lifetime of the world.
    CityId
}

define_id! {
    /// Unique identifier for an alien, stable for the whole run.
    AlienId
}
