//! CLI output formatting.
//!
//! Report text is built as `String`s so tests can inspect it; the `print_*`
//! wrappers only write it to stdout.

use std::fmt::Write as _;

use crate::config::SimulationConfig;
use crate::simulation::SimulationSummary;
use crate::stats::CostDriver;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Version string, with the git hash when the build captured one.
#[must_use]
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => {
            let short = hash.get(..8).unwrap_or(hash);
            format!("sprintsim {version} ({short})")
        }
        _ => format!("sprintsim {version}"),
    }
}

/// Print version information.
pub fn print_version() {
    println!("{}", version_string());
}

/// Print help message.
pub fn print_help() {
    println!(
        r"sprintsim - Monte Carlo cost and schedule estimator for agile projects

USAGE:
    sprintsim <COMMAND> [OPTIONS]

COMMANDS:
    run <config.yaml>           Run a simulation and print the summary
        --seed <N>              Override the configured seed
        -n, --iterations <N>    Override the iteration count
        --csv <PATH>            Export per-iteration results as CSV
        --json <PATH>           Export the run report as JSON
        -v, --verbose           Enable verbose output

    verify <config.yaml>        Check that a seeded run is reproducible
        --runs <N>              Number of verification runs (default: 3)

    init                        Print the default configuration as YAML

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    sprintsim init > project.yaml
    sprintsim run project.yaml --seed 42 --csv results.csv
    sprintsim verify project.yaml --runs 5

LOGGING:
    Set SPRINTSIM_LOG (e.g. SPRINTSIM_LOG=debug) to control log output.
"
    );
}

/// Format a currency amount with thousands separators, no decimals.
#[must_use]
pub fn format_money(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Render the run summary report.
#[must_use]
pub fn format_run_report(
    config: &SimulationConfig,
    seed: u64,
    summary: &SimulationSummary,
    drivers: &[CostDriver],
    verbose: bool,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Iterations: {}", summary.iterations);
    let _ = writeln!(out, "Seed: {seed}");
    let _ = writeln!(
        out,
        "Baseline: {:.0} SP at {:.0} SP/sprint ≈ {:.1} sprints (~{:.1} months)",
        config.scope.baseline_points,
        config.velocity.mean,
        config.baseline_sprints(),
        config.baseline_months()
    );
    let _ = writeln!(out, "{RULE}\n");

    let _ = writeln!(out, "Key Metrics:");
    let _ = writeln!(out, "  Median Scope:     {:.0} SP", summary.median_scope_sp);
    let _ = writeln!(
        out,
        "  Median Duration:  {:.1} months",
        summary.duration_months.median
    );
    let _ = writeln!(out, "  Median TCO:       {}", format_money(summary.tco.median));
    let _ = writeln!(
        out,
        "  Profit Margin:    {:.1}%",
        summary.median_margin * 100.0
    );

    let _ = writeln!(out, "\nRisk & Confidence:");
    let _ = writeln!(out, "  P80 TCO:          {}", format_money(summary.tco.p80));
    let _ = writeln!(
        out,
        "  Chance of Profit: {:.1}%",
        summary.probability_of_profit * 100.0
    );
    let _ = writeln!(
        out,
        "  P90 Duration:     {:.1} months",
        summary.duration_months.p90
    );

    if verbose {
        let _ = writeln!(out, "  P90 TCO:          {}", format_money(summary.tco.p90));
        let _ = writeln!(out, "  Mean TCO:         {}", format_money(summary.mean_tco));
        let _ = writeln!(out, "  Median Profit:    {}", format_money(summary.median_profit));
        let _ = writeln!(
            out,
            "  P80 Duration:     {:.1} months",
            summary.duration_months.p80
        );
    }

    let significant: Vec<&CostDriver> = drivers.iter().filter(|d| d.is_significant()).collect();
    if !significant.is_empty() {
        let _ = writeln!(out, "\nTop Cost Drivers (correlation with TCO):");
        for driver in &significant {
            let _ = writeln!(out, "  {:<10} {:+.2}", driver.driver, driver.correlation);
        }
    }

    let high_impact: Vec<String> = drivers
        .iter()
        .filter(|d| d.is_high_impact())
        .map(|d| d.driver.to_string())
        .collect();
    if !high_impact.is_empty() {
        let _ = writeln!(out, "\n! Highest impact risks: {}", high_impact.join(", "));
    }

    let _ = writeln!(out, "\n{RULE}");
    out
}

/// Print the run summary report.
pub fn print_run_report(
    config: &SimulationConfig,
    seed: u64,
    summary: &SimulationSummary,
    drivers: &[CostDriver],
    verbose: bool,
) {
    print!(
        "{}",
        format_run_report(config, seed, summary, drivers, verbose)
    );
}
