//! City node with four fixed outgoing link slots.
//!
//! A [`City`] owns at most one outgoing [`Link`] per [`Direction`]. Links
//! are directed: `A north=B` says nothing about how `B` connects back.
//! Each link remembers the destination's name as well as its handle so a
//! city can render itself without consulting the store; names never
//! change once a city exists.

use invasion_types::{CityId, Direction};

/// A directed link from one city to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Handle of the destination city.
    pub city: CityId,
    /// Name of the destination city.
    pub name: String,
}

/// One optional destination per direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct LinkSlots {
    north: Option<Link>,
    east: Option<Link>,
    south: Option<Link>,
    west: Option<Link>,
}

impl LinkSlots {
    const fn slot(&self, direction: Direction) -> Option<&Link> {
        match direction {
            Direction::North => self.north.as_ref(),
            Direction::East => self.east.as_ref(),
            Direction::South => self.south.as_ref(),
            Direction::West => self.west.as_ref(),
        }
    }

    const fn slot_mut(&mut self, direction: Direction) -> &mut Option<Link> {
        match direction {
            Direction::North => &mut self.north,
            Direction::East => &mut self.east,
            Direction::South => &mut self.south,
            Direction::West => &mut self.west,
        }
    }
}

/// A city in the world graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    id: CityId,
    name: String,
    links: LinkSlots,
}

impl City {
    /// Create a city with no outgoing links.
    pub fn new(id: CityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            links: LinkSlots::default(),
        }
    }

    /// The city's handle.
    pub const fn id(&self) -> CityId {
        self.id
    }

    /// The city's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The outgoing link in `direction`, if one is set.
    pub const fn link(&self, direction: Direction) -> Option<&Link> {
        self.links.slot(direction)
    }

    /// All outgoing links in canonical North, East, South, West order.
    pub fn links(&self) -> impl Iterator<Item = (Direction, &Link)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| self.link(direction).map(|link| (direction, link)))
    }

    /// Distinct destination cities reachable from this city.
    ///
    /// A destination reachable through two directions is listed once, at
    /// the position of its first direction in canonical order.
    pub fn available_links(&self) -> Vec<CityId> {
        let mut destinations: Vec<CityId> = Vec::with_capacity(Direction::ALL.len());
        for (_, link) in self.links() {
            if !destinations.contains(&link.city) {
                destinations.push(link.city);
            }
        }
        destinations
    }

    /// Whether the city has at least one outgoing link.
    pub fn has_links(&self) -> bool {
        self.links().next().is_some()
    }

    pub(crate) fn set_link(&mut self, direction: Direction, link: Link) {
        *self.links.slot_mut(direction) = Some(link);
    }

    /// Clear every slot pointing at `target`. Returns how many were cleared.
    pub(crate) fn remove_links_to(&mut self, target: CityId) -> usize {
        let mut removed: usize = 0;
        for direction in Direction::ALL {
            let slot = self.links.slot_mut(direction);
            if slot.as_ref().is_some_and(|link| link.city == target) {
                *slot = None;
                removed = removed.saturating_add(1);
            }
        }
        removed
    }
}

impl core::fmt::Display for City {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)?;
        for (direction, link) in self.links() {
            write!(f, " {direction}={}", link.name)?;
        }
        Ok(())
    }
}
