//! Engine phases and the summary of a finished run.

use invasion_types::AlienId;

/// Where the engine is in its life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    /// Nothing loaded yet.
    Created,
    /// Map text parsed into the world.
    MapLoaded,
    /// Aliens spawned and placed.
    Prepared,
    /// The given number of steps have run.
    Stepping(u64),
    /// Surviving cities have been written out.
    Finalized,
}

/// Reason why the step loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The configured step limit was reached.
    MaxStepsReached,
    /// No untrapped alien remains (also the case when none were spawned).
    AllAliensTrapped,
    /// Every city has been destroyed.
    AllCitiesDestroyed,
}

/// A city destroyed by two colliding aliens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destruction {
    /// Step during which the collision happened; 0 means preparation.
    pub step: u64,
    /// Name of the destroyed city.
    pub city: String,
    /// The alien that moved in.
    pub attacker: AlienId,
    /// The alien that was already there.
    pub defender: AlienId,
}

/// Summary returned by a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    /// Why the loop stopped.
    pub end_reason: EndReason,
    /// Number of steps executed.
    pub steps: u64,
    /// Every destruction, in the order it happened.
    pub destructions: Vec<Destruction>,
    /// Number of cities still alive at the end.
    pub surviving_cities: usize,
    /// Number of trapped aliens at the end.
    pub trapped_aliens: usize,
}
