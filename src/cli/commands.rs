//! CLI command handlers.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{info, warn};

use super::output::{print_help, print_run_report, print_version};
use super::{Args, Command};
use crate::config::SimulationConfig;
use crate::error::{SimError, SimResult};
use crate::export::{self, RunReport};
use crate::simulation::Simulation;

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run {
            config_path,
            seed_override,
            iterations_override,
            csv_path,
            json_path,
            verbose,
        } => {
            let options = RunOptions {
                seed_override,
                iterations_override,
                csv_path,
                json_path,
                verbose,
            };
            exit_code(run_simulation(&config_path, &options))
        }
        Command::Verify { config_path, runs } => match verify_reproducibility(&config_path, runs) {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::from(1),
            Err(e) => exit_code(Err(e)),
        },
        Command::Init => exit_code(print_default_config()),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

fn exit_code(result: SimResult<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if e.is_configuration_error() {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
    }
}

/// Options for the `run` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Seed to use instead of the configured one.
    pub seed_override: Option<u64>,
    /// Iteration count to use instead of the configured one.
    pub iterations_override: Option<usize>,
    /// CSV export destination.
    pub csv_path: Option<PathBuf>,
    /// JSON report destination.
    pub json_path: Option<PathBuf>,
    /// Verbose report.
    pub verbose: bool,
}

/// Load a configuration and apply command-line overrides.
///
/// # Errors
///
/// Returns error if the file cannot be loaded or the result is invalid.
pub fn load_config(
    path: &Path,
    seed_override: Option<u64>,
    iterations_override: Option<usize>,
) -> SimResult<SimulationConfig> {
    let mut config = SimulationConfig::load(path)?;
    if let Some(seed) = seed_override {
        config.seed = Some(seed);
    }
    if let Some(iterations) = iterations_override {
        config.iterations = iterations;
    }
    config.check()?;
    Ok(config)
}

/// Run a simulation from a YAML file, print the report and export.
///
/// # Errors
///
/// Returns error if configuration or export fails.
pub fn run_simulation(path: &Path, options: &RunOptions) -> SimResult<()> {
    info!(path = %path.display(), "loading configuration");
    let config = load_config(path, options.seed_override, options.iterations_override)?;

    let simulation = Simulation::new(config)?;
    let outcome = simulation.run();
    let report = RunReport::from_outcome(&outcome);

    print_run_report(
        simulation.config(),
        outcome.seed,
        &outcome.summary,
        &report.cost_drivers,
        options.verbose,
    );

    if let Some(csv_path) = &options.csv_path {
        export::to_csv(&outcome.results, csv_path)?;
        println!("Results written to {}", csv_path.display());
    }

    if let Some(json_path) = &options.json_path {
        report.write_json(json_path)?;
        println!("Report written to {}", json_path.display());
    }

    Ok(())
}

/// Run a configuration `runs` times and compare the result sequences.
///
/// An unseeded configuration is pinned to the seed of the first run so the
/// comparison is meaningful.
///
/// # Errors
///
/// Returns error if the configuration is invalid.
pub fn verify_reproducibility(path: &Path, runs: usize) -> SimResult<bool> {
    if runs < 2 {
        return Err(SimError::config(format!(
            "verify needs at least 2 runs, got {runs}"
        )));
    }

    let mut config = load_config(path, None, None)?;
    if config.seed.is_none() {
        warn!("configuration has no seed; pinning one for verification");
    }

    let reference = Simulation::new(config.clone())?.run();
    config.seed = Some(reference.seed);
    let simulation = Simulation::new(config)?;

    println!(
        "Verifying {} with seed {} over {runs} runs",
        path.display(),
        reference.seed
    );

    let mut identical = true;
    for run in 2..=runs {
        let outcome = simulation.run();
        let same = outcome == reference;
        println!("  Run {run}: {}", if same { "✓ identical" } else { "✗ differs" });
        identical &= same;
    }

    if identical {
        println!("✓ Reproducible: all {runs} runs produced identical results");
    } else {
        println!("✗ Not reproducible");
    }
    Ok(identical)
}

/// Print the default configuration as YAML.
///
/// # Errors
///
/// Returns error if serialization fails.
pub fn print_default_config() -> SimResult<()> {
    let yaml = SimulationConfig::default().to_yaml()?;
    print!("{yaml}");
    Ok(())
}
