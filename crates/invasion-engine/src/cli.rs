//! Command-line flags and their merge over the file configuration.

use std::path::PathBuf;

use clap::Parser;
use invasion_core::config::RunConfig;

/// An alien invasion simulator.
///
/// Reads a world map, unleashes aliens on random cities, and prints every
/// city destroyed along the way followed by what is left of the world.
#[derive(Parser, Debug)]
#[command(name = "alien-invasion", version)]
pub struct Args {
    /// Total number of aliens [default: 5]
    #[arg(short = 'n', long)]
    pub aliens: Option<u32>,

    /// Maximum number of steps [default: 10000]
    #[arg(short = 's', long)]
    pub steps: Option<u64>,

    /// World map file path [default: map.txt]
    #[arg(short = 'm', long)]
    pub file: Option<PathBuf>,

    /// Seed for the random source (fresh seed when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Configuration file [default: invasion-config.yaml if present]
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Apply the flags that were given on top of `run`.
    pub fn merge_into(self, mut run: RunConfig) -> RunConfig {
        if let Some(aliens) = self.aliens {
            run.aliens = aliens;
        }
        if let Some(steps) = self.steps {
            run.max_steps = steps;
        }
        if let Some(file) = self.file {
            run.map_file = file;
        }
        if self.seed.is_some() {
            run.seed = self.seed;
        }
        run
    }
}
