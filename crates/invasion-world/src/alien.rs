//! Alien entity.

use invasion_types::{AlienId, CityId};

/// An alien roaming the world graph.
///
/// `city` is a convenience back-reference only. The occupancy index in
/// [`WorldMap`](crate::WorldMap) is the source of truth for who stands
/// where, and the store keeps both in sync on every move and trap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alien {
    id: AlienId,
    city: Option<CityId>,
}

impl Alien {
    /// Create an alien that has not been placed anywhere yet.
    pub const fn new(id: AlienId) -> Self {
        Self { id, city: None }
    }

    /// The alien's identifier.
    pub const fn id(&self) -> AlienId {
        self.id
    }

    /// The city the alien currently occupies, if any.
    pub const fn city(&self) -> Option<CityId> {
        self.city
    }

    pub(crate) const fn set_city(&mut self, city: Option<CityId>) {
        self.city = city;
    }
}

impl core::fmt::Display for Alien {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Alien #{}", self.id)
    }
}
