//! sprintsim CLI - Monte Carlo cost and schedule estimator
//!
//! All logic lives in the library's `cli` module so it can be tested.

use std::process::ExitCode;

use sprintsim::cli::{init_tracing, run_cli, Args};

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.command.is_verbose());
    run_cli(args)
}
