//! The simulation engine: parse, prepare, step, finalize.
//!
//! [`SimulationEngine`] owns the [`WorldMap`], an injected
//! [`RandomSource`], and the output sink. A full run goes through:
//!
//! 1. **Load**: map text is parsed into cities and links.
//! 2. **Prepare**: aliens `1..=N` are spawned one by one, each dropped on a
//!    uniformly random alive city. Placement uses the same collision
//!    protocol as stepping, so cities can fall before the first step.
//! 3. **Step**: every untrapped alien (snapshot taken when the step starts,
//!    trapped status re-checked before each move) hops to a random
//!    destination among the distinct cities its current city links to.
//! 4. **Finalize**: a blank line, then every surviving city rendered on
//!    its own line.
//!
//! The loop stops once the step limit is reached, no untrapped alien is
//! left, or every city is gone. A raised [`StopSignal`] aborts the run with
//! [`SimulationError::ContextCancelled`] and skips finalization.

use std::io::{BufRead, Write};

use invasion_types::{AlienId, CityId};
use invasion_world::{Alien, City, WorldMap};
use tracing::{debug, info, warn};

use crate::error::SimulationError;
use crate::parse;
use crate::random::{RandomError, RandomSource};
use crate::report::{Destruction, EndReason, EnginePhase, SimulationReport};
use crate::stop::StopSignal;

/// Alien invasion simulation engine.
#[derive(Debug)]
pub struct SimulationEngine<R, W> {
    world: WorldMap,
    random: R,
    out: W,
    start_aliens: u32,
    max_steps: u64,
    steps: u64,
    phase: EnginePhase,
    destructions: Vec<Destruction>,
}

impl<R: RandomSource, W: Write> SimulationEngine<R, W> {
    /// Create an engine over an empty world.
    pub fn new(start_aliens: u32, max_steps: u64, random: R, out: W) -> Self {
        Self::with_world(WorldMap::new(), start_aliens, max_steps, random, out)
    }

    /// Create an engine over an existing world.
    pub const fn with_world(
        world: WorldMap,
        start_aliens: u32,
        max_steps: u64,
        random: R,
        out: W,
    ) -> Self {
        Self {
            world,
            random,
            out,
            start_aliens,
            max_steps,
            steps: 0,
            phase: EnginePhase::Created,
            destructions: Vec::new(),
        }
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    /// The world being simulated.
    pub const fn world(&self) -> &WorldMap {
        &self.world
    }

    /// Mutable access to the world, for seeding test scenarios.
    pub const fn world_mut(&mut self) -> &mut WorldMap {
        &mut self.world
    }

    /// The output sink.
    pub const fn output(&self) -> &W {
        &self.out
    }

    /// Consume the engine and return its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Current life-cycle phase.
    pub const fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// Number of steps simulated so far.
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Every city destruction so far, in order.
    pub fn destructions(&self) -> &[Destruction] {
        &self.destructions
    }

    // -------------------------------------------------------------------
    // Life cycle
    // -------------------------------------------------------------------

    /// Parse map text into the world.
    ///
    /// # Errors
    ///
    /// See [`parse::load_map`].
    pub fn load_map<I: BufRead>(&mut self, input: I) -> Result<(), SimulationError> {
        let definitions = parse::load_map(input, &mut self.world)?;
        info!(
            definitions,
            cities = self.world.city_count(),
            "Map loaded"
        );
        self.phase = EnginePhase::MapLoaded;
        Ok(())
    }

    /// Spawn the aliens and place each on a random alive city.
    ///
    /// Stops early, successfully, as soon as no city is left to land on.
    /// The alien being spawned at that point stays registered but unplaced.
    ///
    /// # Errors
    ///
    /// Returns the first world, random, or output error.
    pub fn prepare(&mut self) -> Result<(), SimulationError> {
        info!(
            aliens = self.start_aliens,
            cities = self.world.city_count(),
            "Prepare"
        );

        for raw in 1..=self.start_aliens {
            let alien = self.world.add_alien(AlienId::new(raw))?;

            let alive = self.world.alive_cities();
            if alive.is_empty() {
                info!(alien = %alien, "No city left to land on");
                break;
            }
            let city = pick(&mut self.random, &alive)?;
            self.move_alien_to_city(alien, city)?;
        }

        self.phase = EnginePhase::Prepared;
        Ok(())
    }

    /// Why the loop should stop now, or `None` if another step can run.
    ///
    /// Conditions are checked in order: step limit, untrapped aliens,
    /// alive cities.
    pub fn end_reason(&self) -> Option<EndReason> {
        if self.steps >= self.max_steps {
            return Some(EndReason::MaxStepsReached);
        }
        if self.world.untrapped_aliens().is_empty() {
            return Some(EndReason::AllAliensTrapped);
        }
        if self.world.city_count() == 0 {
            return Some(EndReason::AllCitiesDestroyed);
        }
        None
    }

    /// Whether another step can be simulated.
    pub fn has_next_step(&self) -> bool {
        self.end_reason().is_none()
    }

    /// Simulate one step: move every untrapped alien once.
    ///
    /// The alien list is snapshotted when the step starts. An alien trapped
    /// by an earlier move of the same step is skipped; an alien whose city
    /// has no outgoing link stays where it is.
    ///
    /// # Errors
    ///
    /// Returns the first world, random, or output error.
    pub fn simulate_next_step(&mut self) -> Result<(), SimulationError> {
        self.steps = self.steps.saturating_add(1);
        self.phase = EnginePhase::Stepping(self.steps);
        debug!(step = self.steps, "Simulate step");

        for alien in self.world.untrapped_aliens() {
            if self.world.is_trapped_alien(alien)? {
                continue;
            }

            let Some(current) = self.world.alien(alien).and_then(Alien::city) else {
                continue;
            };
            let destinations = self
                .world
                .get_city(current)
                .map(City::available_links)
                .unwrap_or_default();
            if destinations.is_empty() {
                continue;
            }

            let next = pick(&mut self.random, &destinations)?;
            self.move_alien_to_city(alien, next)?;
        }

        Ok(())
    }

    /// Write the surviving cities: a blank line, then one city per line.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Io`] if writing fails.
    pub fn finalize(&mut self) -> Result<(), SimulationError> {
        info!(
            steps = self.steps,
            surviving_cities = self.world.city_count(),
            "Finalize"
        );

        writeln!(self.out)?;
        for city in self.world.cities() {
            writeln!(self.out, "{city}")?;
        }
        self.out.flush()?;

        self.phase = EnginePhase::Finalized;
        Ok(())
    }

    /// Run a whole simulation over the map text in `input`.
    ///
    /// The stop signal is checked before every loop iteration.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::ContextCancelled`] if `stop` was raised,
    /// or the first parse, world, random, or output error.
    pub fn run<I: BufRead>(
        &mut self,
        input: I,
        stop: &StopSignal,
    ) -> Result<SimulationReport, SimulationError> {
        info!(
            aliens = self.start_aliens,
            max_steps = self.max_steps,
            "Run"
        );
        self.load_map(input)?;
        self.prepare()?;

        loop {
            if stop.is_stop_requested() {
                warn!(step = self.steps, "Simulation was cancelled");
                return Err(SimulationError::ContextCancelled);
            }
            if let Some(end_reason) = self.end_reason() {
                self.finalize()?;
                let report = self.report(end_reason);
                info!(
                    reason = ?report.end_reason,
                    steps = report.steps,
                    destroyed = report.destructions.len(),
                    surviving_cities = report.surviving_cities,
                    "Simulation ended"
                );
                return Ok(report);
            }
            self.simulate_next_step()?;
        }
    }

    // -------------------------------------------------------------------
    // Collision protocol
    // -------------------------------------------------------------------

    /// Move `alien` onto `city`, fighting whoever is already there.
    ///
    /// - Same alien already on the city: nothing happens.
    /// - City empty: ordinary move.
    /// - Another alien there: both are trapped (mover first), the city is
    ///   destroyed, and a destruction line is written.
    ///
    /// Returns `true` if the city was destroyed.
    ///
    /// # Errors
    ///
    /// Returns the first world or output error.
    pub fn move_alien_to_city(
        &mut self,
        alien: AlienId,
        city: CityId,
    ) -> Result<bool, SimulationError> {
        debug!(alien = %alien, city = %city, "move_alien_to_city");

        match self.world.alien_at_city(city)? {
            Some(occupant) if occupant == alien => Ok(false),
            None => {
                self.world.move_alien(alien, city)?;
                Ok(false)
            }
            Some(occupant) => {
                let name = self
                    .world
                    .get_city(city)
                    .map(|c| c.name().to_owned())
                    .unwrap_or_default();

                self.world.trap_alien(alien)?;
                self.world.trap_alien(occupant)?;
                self.world.destroy_city(city)?;

                writeln!(
                    self.out,
                    "{name} has been destroyed by {} and {}",
                    Alien::new(alien),
                    Alien::new(occupant)
                )?;
                info!(
                    step = self.steps,
                    city = %name,
                    attacker = %alien,
                    defender = %occupant,
                    "City destroyed"
                );
                self.destructions.push(Destruction {
                    step: self.steps,
                    city: name,
                    attacker: alien,
                    defender: occupant,
                });
                Ok(true)
            }
        }
    }

    fn report(&self, end_reason: EndReason) -> SimulationReport {
        SimulationReport {
            end_reason,
            steps: self.steps,
            destructions: self.destructions.clone(),
            surviving_cities: self.world.city_count(),
            trapped_aliens: self.world.trapped_aliens().len(),
        }
    }
}

/// Pick a uniformly random element of a non-empty slice.
fn pick<R: RandomSource>(random: &mut R, candidates: &[CityId]) -> Result<CityId, SimulationError> {
    let bound = candidates.len();
    let index = random.random_index(bound)?;
    candidates
        .get(index)
        .copied()
        .ok_or_else(|| RandomError::OutOfBounds { bound }.into())
}
