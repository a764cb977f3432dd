//! CLI module for sprintsim.
//!
//! All CLI logic lives here rather than in `main.rs` so it can be tested.
//! The entry point `run_cli` is called from `main.rs` with parsed
//! arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, DEFAULT_VERIFY_RUNS};
pub use commands::{
    load_config, print_default_config, run_cli, run_simulation, verify_reproducibility, RunOptions,
};
pub use output::{
    format_money, format_run_report, print_help, print_run_report, print_version, version_string,
};

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SPRINTSIM_LOG";

/// Install the stderr log subscriber.
///
/// Respects [`LOG_ENV`]; defaults to `info` when verbose, `warn` otherwise.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
