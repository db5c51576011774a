//! World graph: cities as nodes, directional links as edges, aliens on top.
//!
//! The [`WorldMap`] is the single store the engine reads and mutates. It
//! owns every alive [`City`] and every [`Alien`], and maintains:
//!
//! - a name index (`name -> CityId`) for lookups while parsing,
//! - an occupancy index (`CityId -> AlienId`), partial and injective,
//! - the trapped set,
//! - a reverse-link index (`CityId -> predecessors`) so destroying a city
//!   can clear the links pointing into it without scanning the graph.
//!
//! All collections are ordered maps, so iteration is deterministic: cities
//! come back in creation order and aliens in ascending id order.
//!
//! The store takes no locks. Callers sharing it across threads must
//! serialize access themselves.

use std::collections::{BTreeMap, BTreeSet};

use invasion_types::{AlienId, CityId, Direction};
use tracing::debug;

use crate::alien::Alien;
use crate::city::{City, Link};
use crate::error::WorldError;

/// The world graph holding all cities, aliens, and their indices.
#[derive(Debug, Clone, Default)]
pub struct WorldMap {
    /// Alive cities indexed by handle.
    cities: BTreeMap<CityId, City>,
    /// Alive cities indexed by name.
    names: BTreeMap<String, CityId>,
    /// Next handle to issue. Every handle below it was issued once.
    next_city: u32,
    /// Reverse adjacency: city -> cities holding a live link to it.
    inbound: BTreeMap<CityId, BTreeSet<CityId>>,
    /// All aliens ever registered.
    aliens: BTreeMap<AlienId, Alien>,
    /// Aliens permanently out of play.
    trapped: BTreeSet<AlienId>,
    /// Occupancy: city -> the single alien standing on it.
    occupants: BTreeMap<CityId, AlienId>,
}

impl WorldMap {
    /// Create an empty world.
    pub const fn new() -> Self {
        Self {
            cities: BTreeMap::new(),
            names: BTreeMap::new(),
            next_city: 0,
            inbound: BTreeMap::new(),
            aliens: BTreeMap::new(),
            trapped: BTreeSet::new(),
            occupants: BTreeMap::new(),
        }
    }

    // -------------------------------------------------------------------
    // City operations
    // -------------------------------------------------------------------

    /// Look up an alive city by name.
    pub fn city(&self, name: &str) -> Option<&City> {
        debug!(city_name = name, "city lookup");
        self.names.get(name).and_then(|id| self.cities.get(id))
    }

    /// Look up an alive city by handle.
    pub fn get_city(&self, id: CityId) -> Option<&City> {
        self.cities.get(&id)
    }

    /// Register a new city with no links.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EmptyName`] for an empty name and
    /// [`WorldError::DuplicateCity`] if the name is already taken by an
    /// alive city.
    pub fn add_city(&mut self, name: &str) -> Result<CityId, WorldError> {
        debug!(city_name = name, "add_city");
        if name.is_empty() {
            return Err(WorldError::EmptyName);
        }
        if self.names.contains_key(name) {
            return Err(WorldError::DuplicateCity(name.to_owned()));
        }

        let id = CityId::new(self.next_city);
        self.next_city = self
            .next_city
            .checked_add(1)
            .ok_or(WorldError::ArithmeticOverflow)?;
        self.names.insert(name.to_owned(), id);
        self.cities.insert(id, City::new(id, name));
        Ok(id)
    }

    /// Return the handle of the named city, registering it first if needed.
    ///
    /// # Errors
    ///
    /// Propagates [`add_city`](Self::add_city) failures.
    pub fn get_or_add_city(&mut self, name: &str) -> Result<CityId, WorldError> {
        match self.names.get(name) {
            Some(&id) => Ok(id),
            None => self.add_city(name),
        }
    }

    /// Handles of all alive cities, in creation order.
    pub fn alive_cities(&self) -> Vec<CityId> {
        self.cities.keys().copied().collect()
    }

    /// Iterate over all alive cities in creation order.
    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.cities.values()
    }

    /// Number of alive cities.
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Destroy a city.
    ///
    /// The city leaves the name, occupancy, and reverse-link indices. Every
    /// predecessor loses the slots that pointed at it, and the city is
    /// dropped from the reverse index of every city it linked to.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::MissingCity`] or [`WorldError::UnknownCity`]
    /// if `id` does not name an alive city.
    pub fn destroy_city(&mut self, id: CityId) -> Result<(), WorldError> {
        debug!(city = %id, "destroy_city");
        let city = self.cities.remove(&id).ok_or_else(|| self.city_error(id))?;
        self.names.remove(city.name());

        if let Some(alien) = self.occupants.remove(&id)
            && let Some(occupant) = self.aliens.get_mut(&alien)
        {
            occupant.set_city(None);
        }

        if let Some(predecessors) = self.inbound.remove(&id) {
            for predecessor in predecessors {
                if let Some(from) = self.cities.get_mut(&predecessor) {
                    let cleared = from.remove_links_to(id);
                    debug!(
                        from = %predecessor,
                        to = %id,
                        cleared,
                        "cleared links into destroyed city"
                    );
                }
            }
        }

        for (_, link) in city.links() {
            if let Some(predecessors) = self.inbound.get_mut(&link.city) {
                predecessors.remove(&id);
            }
        }

        Ok(())
    }

    // -------------------------------------------------------------------
    // Link operations
    // -------------------------------------------------------------------

    /// Add a directed link `from -> to` in `direction`.
    ///
    /// Re-adding the exact same link is a no-op.
    ///
    /// # Errors
    ///
    /// - [`WorldError::MissingCity`] if either handle was never issued,
    /// - [`WorldError::LinkSameCity`] if `from == to`,
    /// - [`WorldError::UnknownCity`] if either city is no longer alive,
    /// - [`WorldError::AlreadyExistsLink`] if `from` already links
    ///   elsewhere in `direction`.
    pub fn add_link(
        &mut self,
        from: CityId,
        to: CityId,
        direction: Direction,
    ) -> Result<(), WorldError> {
        debug!(from = %from, to = %to, %direction, "add_link");
        self.ensure_issued(from)?;
        self.ensure_issued(to)?;
        if from == to {
            return Err(WorldError::LinkSameCity(from));
        }
        if !self.cities.contains_key(&from) {
            return Err(WorldError::UnknownCity(from));
        }
        let to_name = self
            .cities
            .get(&to)
            .map(|city| city.name().to_owned())
            .ok_or(WorldError::UnknownCity(to))?;

        let source = self
            .cities
            .get_mut(&from)
            .ok_or(WorldError::UnknownCity(from))?;
        match source.link(direction) {
            Some(existing) if existing.city == to => return Ok(()),
            Some(existing) => {
                return Err(WorldError::AlreadyExistsLink {
                    from,
                    direction,
                    existing: existing.city,
                });
            }
            None => {}
        }

        source.set_link(
            direction,
            Link {
                city: to,
                name: to_name,
            },
        );
        self.inbound.entry(to).or_default().insert(from);
        Ok(())
    }

    /// Cities currently holding a live link to `id`.
    pub fn predecessors(&self, id: CityId) -> Vec<CityId> {
        self.inbound
            .get(&id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------
    // Alien operations
    // -------------------------------------------------------------------

    /// Look up an alien by identifier.
    pub fn alien(&self, id: AlienId) -> Option<&Alien> {
        self.aliens.get(&id)
    }

    /// Register a new, unplaced alien.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateAlien`] if `id` is already taken.
    pub fn add_alien(&mut self, id: AlienId) -> Result<AlienId, WorldError> {
        debug!(alien = %id, "add_alien");
        if self.aliens.contains_key(&id) {
            return Err(WorldError::DuplicateAlien(id));
        }
        self.aliens.insert(id, Alien::new(id));
        Ok(id)
    }

    /// Number of aliens ever registered.
    pub fn alien_count(&self) -> usize {
        self.aliens.len()
    }

    /// Place `alien` on `city`, releasing whatever city it held before.
    ///
    /// No capacity check is made: the caller resolves collisions first.
    ///
    /// # Errors
    ///
    /// - [`WorldError::UnknownAlien`] if the alien is not registered,
    /// - [`WorldError::TrappedAlien`] if the alien is trapped,
    /// - [`WorldError::MissingCity`] / [`WorldError::UnknownCity`] if
    ///   `city` is not alive.
    pub fn move_alien(&mut self, alien: AlienId, city: CityId) -> Result<(), WorldError> {
        debug!(alien = %alien, city = %city, "move_alien");
        if !self.aliens.contains_key(&alien) {
            return Err(WorldError::UnknownAlien(alien));
        }
        if self.trapped.contains(&alien) {
            return Err(WorldError::TrappedAlien(alien));
        }
        if !self.cities.contains_key(&city) {
            return Err(self.city_error(city));
        }

        let entity = self
            .aliens
            .get_mut(&alien)
            .ok_or(WorldError::UnknownAlien(alien))?;
        if let Some(previous) = entity.city()
            && self.occupants.get(&previous) == Some(&alien)
        {
            self.occupants.remove(&previous);
        }
        entity.set_city(Some(city));
        self.occupants.insert(city, alien);
        Ok(())
    }

    /// The alien standing on `city`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::MissingCity`] or [`WorldError::UnknownCity`]
    /// if `city` is not alive.
    pub fn alien_at_city(&self, city: CityId) -> Result<Option<AlienId>, WorldError> {
        debug!(city = %city, "alien_at_city");
        if !self.cities.contains_key(&city) {
            return Err(self.city_error(city));
        }
        Ok(self.occupants.get(&city).copied())
    }

    /// Trap an alien: it leaves its city and never moves again.
    ///
    /// Trapping an already trapped alien is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::MissingAlien`] if the alien was never
    /// registered.
    pub fn trap_alien(&mut self, alien: AlienId) -> Result<(), WorldError> {
        debug!(alien = %alien, "trap_alien");
        let entity = self
            .aliens
            .get_mut(&alien)
            .ok_or(WorldError::MissingAlien(alien))?;
        if let Some(city) = entity.city()
            && self.occupants.get(&city) == Some(&alien)
        {
            self.occupants.remove(&city);
        }
        entity.set_city(None);
        self.trapped.insert(alien);
        Ok(())
    }

    /// Whether the alien is trapped.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::MissingAlien`] if the alien was never
    /// registered.
    pub fn is_trapped_alien(&self, alien: AlienId) -> Result<bool, WorldError> {
        if !self.aliens.contains_key(&alien) {
            return Err(WorldError::MissingAlien(alien));
        }
        Ok(self.trapped.contains(&alien))
    }

    /// Identifiers of every alien not yet trapped, ascending.
    pub fn untrapped_aliens(&self) -> Vec<AlienId> {
        self.aliens
            .keys()
            .filter(|id| !self.trapped.contains(id))
            .copied()
            .collect()
    }

    /// Identifiers of every trapped alien, ascending.
    pub fn trapped_aliens(&self) -> Vec<AlienId> {
        self.trapped.iter().copied().collect()
    }

    /// Iterate over the occupancy index as `(city, alien)` pairs.
    pub fn occupancy(&self) -> impl Iterator<Item = (CityId, AlienId)> + '_ {
        self.occupants.iter().map(|(city, alien)| (*city, *alien))
    }

    // -------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------

    const fn is_issued(&self, id: CityId) -> bool {
        id.into_inner() < self.next_city
    }

    fn ensure_issued(&self, id: CityId) -> Result<(), WorldError> {
        if self.is_issued(id) {
            Ok(())
        } else {
            Err(WorldError::MissingCity(id))
        }
    }

    /// Error for a handle that does not name an alive city.
    const fn city_error(&self, id: CityId) -> WorldError {
        if self.is_issued(id) {
            WorldError::UnknownCity(id)
        } else {
            WorldError::MissingCity(id)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// `A -east-> B`, plus `C` unlinked.
    fn make_line_world() -> (WorldMap, CityId, CityId, CityId) {
        let mut map = WorldMap::new();
        let a = map.add_city("A").unwrap();
        let b = map.add_city("B").unwrap();
        let c = map.add_city("C").unwrap();
        map.add_link(a, b, Direction::East).unwrap();
        (map, a, b, c)
    }

    #[test]
    fn add_and_get_city() {
        let mut map = WorldMap::new();
        assert!(map.city("City1").is_none());

        let id = map.add_city("City1").unwrap();
        let city = map.city("City1").unwrap();
        assert_eq!(city.id(), id);
        assert_eq!(city.name(), "City1");
        assert_eq!(map.get_city(id).map(City::name), Some("City1"));
    }

    #[test]
    fn empty_name_rejected() {
        let mut map = WorldMap::new();
        assert_eq!(map.add_city(""), Err(WorldError::EmptyName));
        assert_eq!(map.city_count(), 0);
    }

    #[test]
    fn duplicate_city_rejected() {
        let mut map = WorldMap::new();
        map.add_city("City1").unwrap();
        assert_eq!(
            map.add_city("City1"),
            Err(WorldError::DuplicateCity("City1".to_owned()))
        );
    }

    #[test]
    fn get_or_add_city_reuses_existing() {
        let mut map = WorldMap::new();
        let first = map.get_or_add_city("City1").unwrap();
        let second = map.get_or_add_city("City1").unwrap();
        assert_eq!(first, second);
        assert_eq!(map.city_count(), 1);
    }

    #[test]
    fn alive_cities_in_creation_order() {
        let mut map = WorldMap::new();
        let z = map.add_city("Zeta").unwrap();
        let a = map.add_city("Alpha").unwrap();
        let m = map.add_city("Mu").unwrap();
        assert_eq!(map.alive_cities(), vec![z, a, m]);

        map.destroy_city(a).unwrap();
        assert_eq!(map.alive_cities(), vec![z, m]);
    }

    #[test]
    fn destroyed_name_can_be_reused() {
        let mut map = WorldMap::new();
        let old = map.add_city("City1").unwrap();
        map.destroy_city(old).unwrap();
        assert!(map.city("City1").is_none());

        let new = map.add_city("City1").unwrap();
        assert_ne!(old, new);
    }

    #[test]
    fn add_link_sets_slot_and_reverse_index() {
        let (map, a, b, _) = make_line_world();
        let city = map.get_city(a).unwrap();
        assert_eq!(city.link(Direction::East).map(|l| l.city), Some(b));
        assert_eq!(city.to_string(), "A east=B");
        assert_eq!(map.predecessors(b), vec![a]);
        assert!(map.predecessors(a).is_empty());
    }

    #[test]
    fn add_link_is_idempotent() {
        let (mut map, a, b, _) = make_line_world();
        assert!(map.add_link(a, b, Direction::East).is_ok());
        assert_eq!(map.predecessors(b), vec![a]);
        assert_eq!(map.get_city(a).unwrap().to_string(), "A east=B");
    }

    #[test]
    fn add_link_rejects_conflicting_slot() {
        let (mut map, a, b, c) = make_line_world();
        assert_eq!(
            map.add_link(a, c, Direction::East),
            Err(WorldError::AlreadyExistsLink {
                from: a,
                direction: Direction::East,
                existing: b,
            })
        );
    }

    #[test]
    fn add_link_error_kinds() {
        let (mut map, a, b, c) = make_line_world();
        let never = CityId::new(99);

        assert_eq!(
            map.add_link(never, a, Direction::North),
            Err(WorldError::MissingCity(never))
        );
        assert_eq!(
            map.add_link(a, never, Direction::North),
            Err(WorldError::MissingCity(never))
        );
        assert_eq!(
            map.add_link(a, a, Direction::North),
            Err(WorldError::LinkSameCity(a))
        );

        map.destroy_city(c).unwrap();
        assert_eq!(
            map.add_link(c, b, Direction::North),
            Err(WorldError::UnknownCity(c))
        );
        assert_eq!(
            map.add_link(b, c, Direction::North),
            Err(WorldError::UnknownCity(c))
        );
    }

    #[test]
    fn links_are_directed() {
        let (map, a, b, _) = make_line_world();
        assert!(map.get_city(b).unwrap().available_links().is_empty());
        assert_eq!(map.get_city(a).unwrap().available_links(), vec![b]);
    }

    #[test]
    fn destroy_city_clears_predecessor_links() {
        let mut map = WorldMap::new();
        let a = map.add_city("A").unwrap();
        let b = map.add_city("B").unwrap();
        let c = map.add_city("C").unwrap();
        map.add_link(a, b, Direction::East).unwrap();
        map.add_link(a, b, Direction::South).unwrap();
        map.add_link(c, b, Direction::West).unwrap();
        map.add_link(a, c, Direction::North).unwrap();

        map.destroy_city(b).unwrap();

        assert!(map.get_city(b).is_none());
        assert!(map.city("B").is_none());
        assert_eq!(map.get_city(a).unwrap().to_string(), "A north=C");
        assert_eq!(map.get_city(c).unwrap().to_string(), "C");
        assert!(map.predecessors(b).is_empty());
    }

    #[test]
    fn destroy_city_leaves_successor_index_exact() {
        let (mut map, a, b, _) = make_line_world();
        map.destroy_city(a).unwrap();
        assert!(map.predecessors(b).is_empty());
        // Destroying the successor afterwards has nothing left to clear.
        assert!(map.destroy_city(b).is_ok());
        assert_eq!(map.city_count(), 1);
    }

    #[test]
    fn destroy_dead_city_is_error() {
        let (mut map, a, _, _) = make_line_world();
        map.destroy_city(a).unwrap();
        assert_eq!(map.destroy_city(a), Err(WorldError::UnknownCity(a)));
        assert_eq!(
            map.destroy_city(CityId::new(42)),
            Err(WorldError::MissingCity(CityId::new(42)))
        );
    }

    #[test]
    fn add_and_get_alien() {
        let mut map = WorldMap::new();
        let id = AlienId::new(1);
        assert!(map.alien(id).is_none());
        map.add_alien(id).unwrap();
        assert_eq!(map.alien(id).map(Alien::id), Some(id));
        assert_eq!(map.add_alien(id), Err(WorldError::DuplicateAlien(id)));
        assert_eq!(map.alien_count(), 1);
    }

    #[test]
    fn move_alien_updates_occupancy() {
        let (mut map, a, b, _) = make_line_world();
        let alien = map.add_alien(AlienId::new(1)).unwrap();

        map.move_alien(alien, a).unwrap();
        assert_eq!(map.alien_at_city(a).unwrap(), Some(alien));
        assert_eq!(map.alien(alien).and_then(Alien::city), Some(a));

        map.move_alien(alien, b).unwrap();
        assert_eq!(map.alien_at_city(a).unwrap(), None);
        assert_eq!(map.alien_at_city(b).unwrap(), Some(alien));
        assert_eq!(map.alien(alien).and_then(Alien::city), Some(b));
    }

    #[test]
    fn move_alien_error_kinds() {
        let (mut map, a, _, c) = make_line_world();
        let ghost = AlienId::new(7);
        assert_eq!(map.move_alien(ghost, a), Err(WorldError::UnknownAlien(ghost)));

        let alien = map.add_alien(AlienId::new(1)).unwrap();
        assert_eq!(
            map.move_alien(alien, CityId::new(50)),
            Err(WorldError::MissingCity(CityId::new(50)))
        );
        map.destroy_city(c).unwrap();
        assert_eq!(map.move_alien(alien, c), Err(WorldError::UnknownCity(c)));

        map.trap_alien(alien).unwrap();
        assert_eq!(map.move_alien(alien, a), Err(WorldError::TrappedAlien(alien)));
    }

    #[test]
    fn alien_at_city_error_kinds() {
        let (mut map, a, _, _) = make_line_world();
        assert_eq!(map.alien_at_city(a), Ok(None));
        assert_eq!(
            map.alien_at_city(CityId::new(11)),
            Err(WorldError::MissingCity(CityId::new(11)))
        );
        map.destroy_city(a).unwrap();
        assert_eq!(map.alien_at_city(a), Err(WorldError::UnknownCity(a)));
    }

    #[test]
    fn trap_alien_clears_occupancy_and_is_idempotent() {
        let (mut map, a, _, _) = make_line_world();
        let alien = map.add_alien(AlienId::new(1)).unwrap();
        map.move_alien(alien, a).unwrap();

        map.trap_alien(alien).unwrap();
        assert!(map.is_trapped_alien(alien).unwrap());
        assert_eq!(map.alien_at_city(a).unwrap(), None);
        assert_eq!(map.alien(alien).and_then(Alien::city), None);

        map.trap_alien(alien).unwrap();
        assert_eq!(map.trapped_aliens(), vec![alien]);
        assert!(map.untrapped_aliens().is_empty());
    }

    #[test]
    fn trap_does_not_evict_other_occupant() {
        let (mut map, a, _, _) = make_line_world();
        let first = map.add_alien(AlienId::new(1)).unwrap();
        let second = map.add_alien(AlienId::new(2)).unwrap();
        map.move_alien(first, a).unwrap();
        // Forced placement over an occupant: the store does not arbitrate.
        map.move_alien(second, a).unwrap();

        map.trap_alien(first).unwrap();
        assert_eq!(map.alien_at_city(a).unwrap(), Some(second));
    }

    #[test]
    fn trapped_queries_reject_unregistered() {
        let mut map = WorldMap::new();
        let ghost = AlienId::new(3);
        assert_eq!(map.trap_alien(ghost), Err(WorldError::MissingAlien(ghost)));
        assert_eq!(
            map.is_trapped_alien(ghost),
            Err(WorldError::MissingAlien(ghost))
        );
    }

    #[test]
    fn untrapped_aliens_ascending() {
        let mut map = WorldMap::new();
        for raw in [3, 1, 2] {
            map.add_alien(AlienId::new(raw)).unwrap();
        }
        map.trap_alien(AlienId::new(2)).unwrap();
        assert_eq!(
            map.untrapped_aliens(),
            vec![AlienId::new(1), AlienId::new(3)]
        );
    }

    #[test]
    fn destroying_occupied_city_releases_alien() {
        let (mut map, a, _, _) = make_line_world();
        let alien = map.add_alien(AlienId::new(1)).unwrap();
        map.move_alien(alien, a).unwrap();
        map.destroy_city(a).unwrap();

        assert_eq!(map.occupancy().count(), 0);
        assert_eq!(map.alien(alien).and_then(Alien::city), None);
        assert!(!map.is_trapped_alien(alien).unwrap());
    }
}
