//! Result export.
//!
//! - CSV: one row per iteration, in iteration order, two-decimal numbers.
//! - JSON: run report with the summary and cost drivers.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{SimError, SimResult};
use crate::simulation::{IterationResult, SimulationOutcome, SimulationSummary};
use crate::stats::{cost_drivers, CostDriver};

/// CSV header row.
pub const CSV_HEADER: &str =
    "duration_months,one_off_cost,tco_total,profit,profit_margin_pct,scope_sp,sprints";

fn csv_row(result: &IterationResult) -> String {
    let mut line = String::with_capacity(96);
    let _ = write!(
        line,
        "{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
        result.duration_months,
        result.one_off_cost,
        result.tco_total,
        result.profit,
        result.margin_pct(),
        result.scope_sp,
        result.sprints,
    );
    line
}

/// Write results as CSV to any writer.
///
/// # Errors
///
/// Returns error if writing fails.
pub fn write_csv<W: Write>(results: &[IterationResult], writer: W) -> SimResult<()> {
    let mut writer = BufWriter::new(writer);

    writeln!(writer, "{CSV_HEADER}")
        .map_err(|e| SimError::io(format!("Write header failed: {e}")))?;

    for result in results {
        writeln!(writer, "{}", csv_row(result))
            .map_err(|e| SimError::io(format!("Write data failed: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| SimError::io(format!("Flush failed: {e}")))?;

    Ok(())
}

/// Render results as a CSV string.
#[must_use]
pub fn to_csv_string(results: &[IterationResult]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + results.len() * 64);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for result in results {
        out.push_str(&csv_row(result));
        out.push('\n');
    }
    out
}

/// Export results to a CSV file.
///
/// # Errors
///
/// Returns error if file operations fail.
pub fn to_csv(results: &[IterationResult], path: &Path) -> SimResult<()> {
    let file =
        File::create(path).map_err(|e| SimError::io(format!("Failed to create file: {e}")))?;
    write_csv(results, file)
}

/// Machine-readable run report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Seed the run used.
    pub seed: u64,
    /// Iterations run.
    pub iterations: usize,
    /// Summary statistics.
    pub summary: SimulationSummary,
    /// TCO drivers, strongest first.
    pub cost_drivers: Vec<CostDriver>,
}

impl RunReport {
    /// Build a report from a run.
    #[must_use]
    pub fn from_outcome(outcome: &SimulationOutcome) -> Self {
        Self {
            seed: outcome.seed,
            iterations: outcome.results.len(),
            summary: outcome.summary,
            cost_drivers: cost_drivers(&outcome.results),
        }
    }

    /// Render as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> SimResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SimError::serialization(format!("JSON serialization failed: {e}")))
    }

    /// Write the report to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file operations fail.
    pub fn write_json(&self, path: &Path) -> SimResult<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| SimError::io(format!("Write failed: {e}")))
    }
}
