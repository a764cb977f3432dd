//! Monte Carlo project simulation.
//!
//! A [`Simulation`] validates its configuration once, then runs the
//! [`Sampler`] `N` times and reduces the results to a
//! [`SimulationSummary`]:
//!
//! ```rust
//! use sprintsim::prelude::*;
//!
//! let config = SimulationConfig::builder().seed(42).iterations(1_000).build();
//! let outcome = Simulation::new(config)?.run();
//!
//! assert_eq!(outcome.results.len(), 1_000);
//! assert!(outcome.summary.tco.median <= outcome.summary.tco.p90);
//! # Ok::<(), sprintsim::SimError>(())
//! ```

mod result;
mod sampler;
mod summary;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use result::IterationResult;
pub use sampler::{Sampler, MAX_REWORK_FRACTION, MIN_SCOPE_SP, MIN_VELOCITY_FRACTION};
pub use summary::SimulationSummary;

use crate::config::SimulationConfig;
use crate::engine::rng::SimRng;
use crate::error::SimResult;

/// Working days in one sprint (two weeks).
pub const DAYS_PER_SPRINT: f64 = 10.0;

/// Working days in one month.
pub const WORK_DAYS_PER_MONTH: f64 = 20.0;

/// Months in one year.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Markup on the one-off cost that sets the billed price.
pub const TARGET_MARKUP: f64 = 0.20;

/// A validated, ready-to-run simulation.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    sampler: Sampler,
}

impl Simulation {
    /// Validate the configuration and build the sampler.
    ///
    /// # Errors
    ///
    /// Returns a configuration error (zero iterations, negative or
    /// non-finite rates or scope, ...) before any sampling happens.
    pub fn new(config: SimulationConfig) -> SimResult<Self> {
        let sampler = Sampler::new(&config)?;
        Ok(Self { config, sampler })
    }

    /// The configuration this simulation runs.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Configured iteration count.
    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.config.iterations
    }

    /// Run every iteration against the given random source.
    ///
    /// Results are in iteration order.
    pub fn run_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<IterationResult> {
        let n = self.iterations();
        (0..n).map(|_| self.sampler.sample(&mut *rng)).collect()
    }

    /// Run with the configured seed (or a fresh entropy seed) and summarize.
    #[must_use]
    pub fn run(&self) -> SimulationOutcome {
        let mut rng = self
            .config
            .seed
            .map_or_else(SimRng::from_entropy, SimRng::new);
        let seed = rng.master_seed();

        info!(
            iterations = self.iterations(),
            seed,
            seeded = self.config.seed.is_some(),
            "running simulation"
        );
        let results = self.run_with(&mut rng);
        let outcome = SimulationOutcome::new(seed, results);

        debug!(
            median_tco = outcome.summary.tco.median,
            p90_duration_months = outcome.summary.duration_months.p90,
            probability_of_profit = outcome.summary.probability_of_profit,
            "simulation complete"
        );
        outcome
    }
}

/// Results of a run plus their summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Seed the run used.
    pub seed: u64,
    /// Per-iteration results in iteration order.
    pub results: Vec<IterationResult>,
    /// Summary over `results`.
    pub summary: SimulationSummary,
}

impl SimulationOutcome {
    /// Summarize a result set produced with `seed`.
    #[must_use]
    pub fn new(seed: u64, results: Vec<IterationResult>) -> Self {
        // Empty only if constructed by hand; a Simulation always has N >= 1.
        let summary = SimulationSummary::from_results(&results).unwrap_or_default();
        Self {
            seed,
            results,
            summary,
        }
    }
}
