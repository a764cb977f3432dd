//! # sprintsim
//!
//! Monte Carlo cost, duration and profitability estimator for agile
//! software projects.
//!
//! Each iteration samples the uncertain parts of a project (final scope,
//! team velocity, rework from hidden bugs, cloud spend) and derives its
//! duration, one-off cost, total cost of ownership and profit. Thousands of
//! iterations are then reduced to percentiles and a probability of profit.
//!
//! ## Example
//!
//! ```rust
//! use sprintsim::prelude::*;
//!
//! let config = SimulationConfig::builder()
//!     .seed(42)
//!     .iterations(2_000)
//!     .baseline_scope(500.0)
//!     .velocity_mean(20.0)
//!     .build();
//!
//! let outcome = Simulation::new(config)?.run();
//! let summary = outcome.summary;
//!
//! assert!(summary.tco.median <= summary.tco.p80);
//! assert!((0.0..=1.0).contains(&summary.probability_of_profit));
//! # Ok::<(), SimError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,
    clippy::imprecise_flops,
    clippy::missing_const_for_fn,
    clippy::too_many_lines
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod simulation;
pub mod stats;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{
        ManagedServiceAccrual, RiskProfile, SimulationConfig, SimulationConfigBuilder,
    };
    pub use crate::engine::rng::SimRng;
    pub use crate::error::{SimError, SimResult};
    pub use crate::export::RunReport;
    pub use crate::simulation::{IterationResult, Simulation, SimulationOutcome, SimulationSummary};
    pub use crate::stats::{cost_drivers, CostDriver, Percentiles};
}

/// Re-export for public API
pub use error::{SimError, SimResult};
