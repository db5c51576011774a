//! Error types for the `invasion-world` crate.
//!
//! Every fallible [`WorldMap`](crate::WorldMap) operation returns a
//! [`WorldError`] naming the one precondition the caller violated. The
//! engine never triggers these on well-formed input.

use invasion_types::{AlienId, CityId, Direction, UnknownDirection};

/// Errors that can occur during world-graph operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// A city was added with an empty name.
    #[error("empty city name not allowed")]
    EmptyName,

    /// A city with the same name is already registered.
    #[error("city is already registered: {0}")]
    DuplicateCity(String),

    /// The city handle was never issued by this world.
    #[error("city is missing: {0}")]
    MissingCity(CityId),

    /// The city handle was issued but the city is no longer alive.
    #[error("city is unknown: {0}")]
    UnknownCity(CityId),

    /// A link was requested from a city to itself.
    #[error("no possible link between same city: {0}")]
    LinkSameCity(CityId),

    /// The source city already links somewhere else in that direction.
    #[error("city {from} already links {direction} to city {existing}")]
    AlreadyExistsLink {
        /// Source city of the rejected link.
        from: CityId,
        /// Direction slot that is already taken.
        direction: Direction,
        /// Destination currently held by the slot.
        existing: CityId,
    },

    /// An alien with the same identifier is already registered.
    #[error("duplicate alien not allowed: {0}")]
    DuplicateAlien(AlienId),

    /// The alien identifier was never registered.
    #[error("alien is missing: {0}")]
    MissingAlien(AlienId),

    /// The alien identifier is not known to this world.
    #[error("alien is unknown: {0}")]
    UnknownAlien(AlienId),

    /// A trapped alien cannot be moved again.
    #[error("alien {0} is trapped and cannot move")]
    TrappedAlien(AlienId),

    /// A direction outside the closed enumeration was supplied.
    #[error(transparent)]
    UnknownDirection(#[from] UnknownDirection),

    /// City handle allocation overflowed.
    #[error("arithmetic overflow in world bookkeeping")]
    ArithmeticOverflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_direction_converts_transparently() {
        let err = WorldError::from(UnknownDirection("up".to_owned()));
        assert_eq!(err.to_string(), "unknown direction provided: up");
    }

    #[test]
    fn link_conflict_names_both_destinations() {
        let err = WorldError::AlreadyExistsLink {
            from: CityId::new(0),
            direction: Direction::North,
            existing: CityId::new(3),
        };
        assert_eq!(err.to_string(), "city 0 already links north to city 3");
    }
}
