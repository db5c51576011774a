//! `alien-invasion` binary.
//!
//! Wires the simulator to the outside world: flags and configuration in,
//! map file in, simulation output on stdout, logs on stderr.
//!
//! # Startup Sequence
//!
//! 1. Parse command-line flags
//! 2. Load configuration from `--config` or `invasion-config.yaml`
//! 3. Initialize structured logging (tracing)
//! 4. Open the map file and seed the random source
//! 5. Install the Ctrl-C / SIGTERM watcher
//! 6. Run the simulation on a blocking task
//! 7. Log the result

mod cli;
mod error;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use clap::Parser;
use invasion_core::config::SimulationConfig;
use invasion_core::engine::SimulationEngine;
use invasion_core::random::SeededRandom;
use invasion_core::stop::StopSignal;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::error::CliError;

/// Default configuration file, looked up in the working directory.
const DEFAULT_CONFIG_PATH: &str = "invasion-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, the map file, or the run fails.
#[tokio::main]
async fn main() -> Result<(), CliError> {
    // 1. Parse flags.
    let args = Args::parse();

    // 2. Load configuration.
    let config = load_config(args.config.as_deref())?;
    let run = args.merge_into(config.simulation);

    // 3. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(
        aliens = run.aliens,
        max_steps = run.max_steps,
        map_file = %run.map_file.display(),
        "alien-invasion starting"
    );

    // 4. Open the map and seed the random source.
    let map = File::open(&run.map_file).map_err(|source| CliError::MapFile {
        path: run.map_file.clone(),
        source,
    })?;
    let random = run
        .seed
        .map_or_else(SeededRandom::from_entropy, SeededRandom::new);
    info!(seed = random.seed(), "Random source seeded");

    // 5. Watch for Ctrl-C / SIGTERM.
    let stop = StopSignal::new();
    let watcher = {
        let stop = stop.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            stop.request_stop();
        })
    };

    // 6. Run the simulation.
    let (aliens, max_steps) = (run.aliens, run.max_steps);
    let report = tokio::task::spawn_blocking(move || {
        let out = BufWriter::new(std::io::stdout().lock());
        let mut engine = SimulationEngine::new(aliens, max_steps, random, out);
        engine.run(BufReader::new(map), &stop)
    })
    .await??;
    watcher.abort();

    // 7. Log results.
    info!(
        end_reason = ?report.end_reason,
        steps = report.steps,
        destroyed = report.destructions.len(),
        surviving_cities = report.surviving_cities,
        "alien-invasion finished"
    );

    Ok(())
}

/// Load configuration from `path`, or from `invasion-config.yaml` if it
/// exists, or fall back to defaults.
fn load_config(path: Option<&Path>) -> Result<SimulationConfig, CliError> {
    if let Some(path) = path {
        return Ok(SimulationConfig::from_file(path)?);
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        Ok(SimulationConfig::from_file(default_path)?)
    } else {
        let mut config = SimulationConfig::default();
        config.simulation.apply_env_overrides()?;
        Ok(config)
    }
}

/// Resolve once Ctrl-C or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    warn!("Shutdown signal received, stopping simulation");
}
